use crate::domain::model::{Assignment, Delimiter, LoadReport, RaffleInput};
use crate::utils::error::Result;

pub trait Storage {
    /// `None` when the file does not exist.
    fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider {
    fn directory(&self) -> &str;
    fn delimiter(&self) -> Delimiter;
    fn seed(&self) -> Option<u64>;
    fn dry_run(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&mut self) -> Result<RaffleInput>;
    fn transform(&mut self, input: RaffleInput) -> Result<Assignment>;
    fn load(&mut self, assignment: Assignment) -> Result<LoadReport>;
}
