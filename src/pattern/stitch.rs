//! In-memory stitch sequence shared by decoding, export and preview

/// Machine instruction attached to a stitch event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StitchCommand {
    /// Needle penetration at the position
    Stitch,
    /// Move without stitching
    Jump,
    /// Cut the thread
    Trim,
    /// Pause the machine
    Stop,
    /// End of design
    End,
    /// Switch to the next thread color
    ColorChange,
}

/// One event in the physical stitch order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stitch {
    /// Horizontal position in device units
    pub x: f64,
    /// Vertical position in device units, embroidery orientation
    pub y: f64,
    /// Optional machine instruction; `None` for bare absolute coordinates
    pub command: Option<StitchCommand>,
}

impl Stitch {
    /// Absolute position with no command tag
    pub const fn absolute(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            command: None,
        }
    }

    /// Position tagged with a machine instruction
    pub const fn with_command(x: f64, y: f64, command: StitchCommand) -> Self {
        Self {
            x,
            y,
            command: Some(command),
        }
    }

    /// Whether this event switches thread color
    pub fn is_color_change(&self) -> bool {
        self.command == Some(StitchCommand::ColorChange)
    }
}

/// Ordered stitch sequence for one design
///
/// Order is the order the machine sews in. Patterns are built once per input
/// and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StitchPattern {
    stitches: Vec<Stitch>,
}

impl StitchPattern {
    /// Create an empty pattern
    pub const fn new() -> Self {
        Self {
            stitches: Vec::new(),
        }
    }

    /// Create an empty pattern with room for `capacity` events
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stitches: Vec::with_capacity(capacity),
        }
    }

    /// Append an untagged absolute stitch
    pub fn add_stitch_absolute(&mut self, x: f64, y: f64) {
        self.stitches.push(Stitch::absolute(x, y));
    }

    /// Append a command at the current needle position
    pub fn add_command(&mut self, command: StitchCommand) {
        let (x, y) = self.stitches.last().map_or((0.0, 0.0), |s| (s.x, s.y));
        self.stitches.push(Stitch::with_command(x, y, command));
    }

    /// Append an arbitrary event
    pub fn push(&mut self, stitch: Stitch) {
        self.stitches.push(stitch);
    }

    /// All events in sewing order
    pub fn stitches(&self) -> &[Stitch] {
        &self.stitches
    }

    /// Number of events, commands included
    pub const fn len(&self) -> usize {
        self.stitches.len()
    }

    /// Whether the pattern holds no events
    pub const fn is_empty(&self) -> bool {
        self.stitches.is_empty()
    }

    /// Number of color change events
    pub fn color_change_count(&self) -> usize {
        self.stitches.iter().filter(|s| s.is_color_change()).count()
    }
}

impl FromIterator<Stitch> for StitchPattern {
    fn from_iter<I: IntoIterator<Item = Stitch>>(iter: I) -> Self {
        Self {
            stitches: iter.into_iter().collect(),
        }
    }
}
