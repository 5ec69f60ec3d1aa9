use xview::colors::MaybeColorize;

pub fn written(something: impl ToString) {
    eprintln!("{} {}", "written".green(), something.to_string());
}

pub fn error(something: impl ToString) {
    eprintln!("{}: {}", "error".red(), something.to_string());
}

pub fn warning(something: impl ToString) {
    eprintln!("{}: {}", "warning".yellow(), something.to_string());
}
