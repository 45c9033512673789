//! What travels through the queues, and how it is laid out as text.

use core::fmt::{
    self,
    Write as _,
};

/// Longest line the panel can show: 128 px at 6 px per glyph.
pub(crate) const LINE_CAPACITY: usize = 21;

/// One line of panel text.
pub type Line = heapless::String<LINE_CAPACITY>;

/// All lines of one frame.
pub type Lines = heapless::Vec<Line, 2>;

/// A temperature/humidity pair. Only finite values are ever constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Climate {
    /// Degrees Celsius.
    pub temperature: f32,
    /// Relative humidity, percent.
    pub humidity: f32,
}

impl Climate {
    /// Returns `None` if either value is NaN or infinite, which is how
    /// sensor drivers commonly report a failed conversion.
    pub fn new(temperature: f32, humidity: f32) -> Option<Self> {
        (temperature.is_finite() && humidity.is_finite()).then_some(Self {
            temperature,
            humidity,
        })
    }
}

/// Something the renderer knows how to put on screen.
pub trait Render {
    fn lines(&self, decimals: usize) -> Lines;
}

impl Render for Climate {
    fn lines(&self, decimals: usize) -> Lines {
        let mut lines = Lines::new();
        let _ = lines.push(line(format_args!(
            "Temperature: {:.*} C",
            decimals, self.temperature
        )));
        let _ = lines.push(line(format_args!(
            "Humidity: {:.*} %",
            decimals, self.humidity
        )));
        lines
    }
}

/// Press count.
impl Render for u32 {
    fn lines(&self, _decimals: usize) -> Lines {
        let mut lines = Lines::new();
        let _ = lines.push(line(format_args!("Button Pressed: {self}")));
        lines
    }
}

// Glyphs past `LINE_CAPACITY` are dropped.
struct Clipped(Line);

impl fmt::Write for Clipped {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

fn line(args: fmt::Arguments<'_>) -> Line {
    let mut clipped = Clipped(Line::new());
    let _ = clipped.write_fmt(args);
    clipped.0
}
