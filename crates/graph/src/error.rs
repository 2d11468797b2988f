use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] legacy_rules_syntax::SyntaxError),

    #[error("Scan error: {0}")]
    Scan(#[from] legacy_rules_scanner::ScanError),
}
