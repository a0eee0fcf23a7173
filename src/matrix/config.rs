//! Configuration for loading matrices and their side-channel metadata

/// Width of one integer in a binary side-channel file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    /// 4-byte little-endian integers
    U32,
    /// 8-byte little-endian integers
    U64,
}

impl IndexWidth {
    /// Size of one entry in bytes
    pub fn bytes(&self) -> usize {
        match self {
            IndexWidth::U32 => 4,
            IndexWidth::U64 => 8,
        }
    }
}

/// How a side-channel degree file is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeEncoding {
    /// Whitespace separated decimal integers
    Ascii,
    /// Packed fixed-width integers
    Binary(IndexWidth),
}

/// Configuration for building CSR stores from files on disk
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Appended to the matrix path to locate the row-degree file
    pub degrees_suffix: String,

    /// Entry width assumed for binary degree files
    pub index_width: IndexWidth,

    /// Whether to look for a degree file at all
    pub use_side_channel: bool,

    /// Number of leading bytes inspected when guessing whether a degree file
    /// is binary
    pub binary_probe_len: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            degrees_suffix: ".degs".to_string(),
            index_width: IndexWidth::U32,
            use_side_channel: true,
            binary_probe_len: 100,
        }
    }
}

impl LoadConfig {
    /// A config that always runs the counting pass
    pub fn without_side_channel() -> Self {
        Self {
            use_side_channel: false,
            ..Self::default()
        }
    }

    /// A config for binary degree files of the given width
    pub fn with_index_width(index_width: IndexWidth) -> Self {
        Self {
            index_width,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoadConfig::default();
        assert_eq!(config.degrees_suffix, ".degs");
        assert_eq!(config.index_width.bytes(), 4);
        assert!(config.use_side_channel);
        assert!(!LoadConfig::without_side_channel().use_side_channel);
        assert_eq!(LoadConfig::with_index_width(IndexWidth::U64).index_width.bytes(), 8);
    }
}
