//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Periods, windows and quantities. Zero, negative or out-of-range
    /// values fall back to `default`.
    fn get_positive_u32(&self, section: &str, key: &str, default: u32) -> u32 {
        u32::try_from(self.get_int(section, key, default as i64))
            .ok()
            .filter(|v| *v > 0)
            .unwrap_or(default)
    }
}
