use crate::utils::error::Result;

/// Whole-file access. Every call opens, reads or writes, and closes.
pub trait Storage {
    fn exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn pets_file(&self) -> &str;
    fn consultations_file(&self) -> &str;
    fn log_file(&self) -> &str;
}
