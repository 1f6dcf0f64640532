use common::Rgb;

pub const DEFAULT_PALETTE_SIZE: usize = 64;

/// Palette used by most ILDA files that do not carry their own. Other tools
/// rely on these exact values, so they must not be tidied up.
pub const DEFAULT_PALETTE: [Rgb; DEFAULT_PALETTE_SIZE] = [
    Rgb::new(255, 0, 0), // red
    Rgb::new(255, 16, 0),
    Rgb::new(255, 32, 0),
    Rgb::new(255, 48, 0),
    Rgb::new(255, 64, 0),
    Rgb::new(255, 80, 0),
    Rgb::new(255, 96, 0),
    Rgb::new(255, 112, 0),
    Rgb::new(255, 128, 0),
    Rgb::new(255, 144, 0),
    Rgb::new(255, 160, 0),
    Rgb::new(255, 176, 0),
    Rgb::new(255, 176, 0),
    Rgb::new(255, 192, 0),
    Rgb::new(255, 208, 0),
    Rgb::new(255, 224, 0),
    Rgb::new(255, 240, 0),
    Rgb::new(255, 255, 0), // yellow
    Rgb::new(192, 255, 0),
    Rgb::new(160, 255, 0),
    Rgb::new(128, 255, 0),
    Rgb::new(96, 255, 0),
    Rgb::new(64, 255, 0),
    Rgb::new(32, 255, 0),
    Rgb::new(0, 255, 0), // green
    Rgb::new(0, 255, 36),
    Rgb::new(0, 255, 73),
    Rgb::new(0, 255, 109),
    Rgb::new(0, 255, 146),
    Rgb::new(0, 255, 182),
    Rgb::new(0, 255, 219),
    Rgb::new(0, 255, 255), // cyan
    Rgb::new(0, 227, 255),
    Rgb::new(0, 198, 255),
    Rgb::new(0, 170, 255),
    Rgb::new(0, 142, 255),
    Rgb::new(0, 113, 255),
    Rgb::new(0, 85, 255),
    Rgb::new(0, 56, 255),
    Rgb::new(0, 28, 255),
    Rgb::new(0, 0, 255), // blue
    Rgb::new(32, 0, 255),
    Rgb::new(64, 0, 255),
    Rgb::new(96, 0, 255),
    Rgb::new(128, 0, 255),
    Rgb::new(160, 0, 255),
    Rgb::new(192, 0, 255),
    Rgb::new(224, 0, 255),
    Rgb::new(255, 0, 255), // magenta
    Rgb::new(255, 32, 255),
    Rgb::new(255, 64, 255),
    Rgb::new(255, 96, 255),
    Rgb::new(255, 128, 255),
    Rgb::new(255, 160, 255),
    Rgb::new(255, 192, 255),
    Rgb::new(255, 224, 255),
    Rgb::new(255, 255, 255), // white
    Rgb::new(255, 224, 224),
    Rgb::new(255, 192, 192),
    Rgb::new(255, 160, 160),
    Rgb::new(255, 128, 128),
    Rgb::new(255, 96, 96),
    Rgb::new(255, 64, 64),
    Rgb::new(255, 32, 32),
];

/// The active color lookup table of a decoder. Only ever swapped as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl Palette {
    pub fn new(entries: Vec<Rgb>) -> Self {
        Self { entries }
    }

    /// `None` when the index is past the end of the table. Deciding what that
    /// means is up to the caller.
    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.entries.get(index as usize).copied()
    }

    /// Throw away the whole table and use `entries` from now on
    pub fn replace(&mut self, entries: Vec<Rgb>) {
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.entries.iter()
    }
}
