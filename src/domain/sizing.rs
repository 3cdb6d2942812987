//! Portfolio size as a step function of the investable amount.

/// `(minimum amount, instrument count)`, highest breakpoint first.
pub const SIZE_BREAKPOINTS: [(f64, usize); 3] = [(500_000.0, 10), (100_000.0, 7), (10_000.0, 5)];

pub const MIN_PORTFOLIO_SIZE: usize = 3;

pub fn target_size(amount: f64) -> usize {
    SIZE_BREAKPOINTS
        .iter()
        .find(|(threshold, _)| amount >= *threshold)
        .map(|&(_, size)| size)
        .unwrap_or(MIN_PORTFOLIO_SIZE)
}
