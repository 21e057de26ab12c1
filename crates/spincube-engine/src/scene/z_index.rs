/// Z-ordering key for overlay draw items. Higher values paint on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Background fills (button bodies).
    pub const BASE: ZIndex = ZIndex(0);
    /// Borders and text drawn over fills.
    pub const CONTENT: ZIndex = ZIndex(1);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}
