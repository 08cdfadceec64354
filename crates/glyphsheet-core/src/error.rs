use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("padding {padding} leaves no room in a {cell_size}px cell")]
    PaddingTooLarge { padding: u32, cell_size: u32 },
    #[error("probe glyph set must not be empty")]
    EmptyProbeSet,
    #[error("probe and floor sizes must be greater than zero")]
    ZeroSize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("character set is empty")]
    Empty,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("column count must be greater than zero")]
    ZeroColumns,
    #[error("cannot lay out an empty character set")]
    EmptyCharset,
    #[error("atlas of {columns}x{rows} cells at {cell_size}px exceeds the maximum image size")]
    TooLarge { columns: u32, rows: u32, cell_size: u32 },
}
