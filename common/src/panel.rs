//! The monochrome display as the renderer sees it.

use display_interface::{
    DisplayError,
    WriteOnlyDataCommand,
};
use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::FONT_6X10,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
    text::{
        Baseline,
        Text,
    },
};
use ssd1306::{
    Ssd1306,
    mode::BufferedGraphicsMode,
    size::DisplaySize,
};

use crate::Render;

const TEXT_ORIGIN: Point = Point::new(2, 2);
const LINE_HEIGHT: i32 = 12;
const BANNER_BOX: Size = Size::new(80, 12);

/// A framebuffered panel: draw into the buffer, then [`commit`](Panel::commit).
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Switch the panel on or off. The framebuffer is kept.
    fn power(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Clear the framebuffer.
    fn blank(&mut self);

    /// Push the framebuffer to the glass.
    fn commit(&mut self) -> Result<(), Self::Error>;
}

impl<DI, SIZE> Panel for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn power(&mut self, on: bool) -> Result<(), DisplayError> {
        self.set_display_on(on)
    }

    fn blank(&mut self) {
        self.clear_buffer();
    }

    fn commit(&mut self) -> Result<(), DisplayError> {
        self.flush()
    }
}

/// Redraw the whole frame with `item`, one text line per field.
pub(crate) fn render<P, R>(panel: &mut P, item: &R, decimals: usize) -> Result<(), P::Error>
where
    P: Panel,
    R: Render + ?Sized,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    panel.blank();
    for (row, line) in item.lines(decimals).iter().enumerate() {
        let at = TEXT_ORIGIN + Point::new(0, row as i32 * LINE_HEIGHT);
        Text::with_baseline(line, at, style, Baseline::Top).draw(panel)?;
    }
    panel.commit()
}

/// Boot banner: `text` inside an outline box in the top-left corner.
pub fn draw_banner<P: Panel>(panel: &mut P, text: &str) -> Result<(), P::Error> {
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    panel.blank();
    Text::with_baseline(text, TEXT_ORIGIN, style, Baseline::Top).draw(panel)?;
    Rectangle::new(Point::zero(), BANNER_BOX)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(panel)?;
    panel.commit()
}
