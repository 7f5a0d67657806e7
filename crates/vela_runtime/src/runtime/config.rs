//! Runtime configuration.

/// Runtime configuration options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Precision in bits of `BigFloat` values created without an explicit one.
    pub big_float_precision: u32,
    /// Number of elements hash collections can hold before their first resize.
    /// Zero leaves new collections without slots until the first insertion.
    pub initial_table_capacity: usize,
    /// Largest left shift of the default `Int` that is carried out.
    pub max_shift: u64,
    /// Largest result, in bits, of raising a default `Int` to a power.
    pub max_pow_bits: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            big_float_precision: 64,
            initial_table_capacity: 0,
            max_shift: 1 << 20,
            max_pow_bits: 1 << 20,
        }
    }
}
