use std::path::PathBuf;

#[derive(Debug)]
pub struct AddDaysResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
}

#[derive(Debug)]
pub struct ExpandResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub constraints_in: usize,
    pub constraints_out: usize,
}
