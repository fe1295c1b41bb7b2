/// Configuration entries that are keyed by a user supplied name.
pub trait ConfigName {
    fn name(&self) -> &str;
}
