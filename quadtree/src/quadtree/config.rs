#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfBoundsPolicy {
    #[default]
    Clamp,
    Reject,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub max_depth: usize,
    pub out_of_bounds: OutOfBoundsPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: 4,
            out_of_bounds: OutOfBoundsPolicy::Clamp,
        }
    }
}
