use super::model::{PickerModel, Surface};
use super::{FONT_FAMILY, GUIDE_WIDTH};
use crate::gui::theme::ThemeColors;
use arcpick::layout::LabelLayout;
use arcpick::{ArcPath, Label, Measure};
use cairo::Context;

/// Measures text with the font currently selected on the context, in user space.
pub struct CairoMetrics<'a> {
    cr: &'a Context,
    arc_length: f64,
}

impl<'a> CairoMetrics<'a> {
    pub fn new(cr: &'a Context, arc_length: f64) -> Self {
        Self { cr, arc_length }
    }
}

impl Measure for CairoMetrics<'_> {
    fn arc_length(&self) -> f64 {
        self.arc_length
    }

    fn label_width(&self, label: &Label) -> f64 {
        self.cr
            .text_extents(label)
            .map(|ext| ext.x_advance())
            .unwrap_or_else(|e| {
                log::warn!("Failed to measure '{}': {}", label, e);
                0.0
            })
    }
}

struct LabelRenderer<'a> {
    layout: &'a LabelLayout,
    arc: &'a ArcPath,
    start: f64,
}

impl<'a> LabelRenderer<'a> {
    fn new(layout: &'a LabelLayout, arc: &'a ArcPath, start: f64) -> Self {
        Self { layout, arc, start }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if self.layout.opacity <= 0.0 {
            return Ok(());
        }

        let color = if self.layout.active {
            colors.active
        } else {
            colors.label
        };
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a * self.layout.opacity);

        // glyph by glyph, each one centred on its own stretch of the arc
        let mut cursor = self.start;
        for glyph in self.layout.label.chars() {
            let glyph = glyph.to_string();
            let advance = cr.text_extents(&glyph)?.x_advance();
            let middle = cursor + advance / 2.0;
            if middle > self.arc.length() {
                break;
            }

            let at = self.arc.point_at(middle);
            cr.save()?;
            cr.translate(at.x, at.y);
            cr.rotate(self.arc.tangent_angle_at(middle));
            cr.move_to(-advance / 2.0, 0.0);
            cr.show_text(&glyph)?;
            cr.restore()?;

            cursor += advance;
        }
        Ok(())
    }
}

fn draw_guide(cr: &Context, arc: &ArcPath, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.guide.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(GUIDE_WIDTH);

    let end = arc.start_angle + arc.sweep;
    if arc.sweep >= 0.0 {
        cr.arc(arc.center.x, arc.center.y, arc.radius, arc.start_angle, end);
    } else {
        cr.arc_negative(arc.center.x, arc.center.y, arc.radius, arc.start_angle, end);
    }
    cr.stroke()
}

/// Draws the picker into a `width` x `height` area, measuring labels on the way so later clicks
/// hit-test against what is on screen.
pub fn draw(
    cr: &Context,
    model: &mut PickerModel,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let surface = Surface::fit(width, height);
    if surface.scale <= 0.0 {
        return Ok(());
    }

    cr.save()?;
    cr.translate(surface.offset.x, surface.offset.y);
    cr.scale(surface.scale, surface.scale);
    cr.select_font_face(FONT_FAMILY, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(model.picker.font_size());

    let arc = model.visible_arc();
    model.measure(&CairoMetrics::new(cr, arc.length()));

    draw_guide(cr, &arc, colors)?;

    let start = model.start_distance();
    for layout in model.picker.layout() {
        LabelRenderer::new(&layout, &arc, start + layout.position).draw(cr, colors)?;
    }
    cr.restore()
}
