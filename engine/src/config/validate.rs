/// Validation hook every managed configuration type implements.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
