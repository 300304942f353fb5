#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    #[inline(always)]
    #[must_use]
    pub const fn is_bid(self) -> bool {
        matches!(self, Self::Bid)
    }
}
