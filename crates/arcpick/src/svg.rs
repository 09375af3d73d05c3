use crate::geometry::{ArcPath, VIEW_BOX, round3};
use crate::picker::Picker;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const PATH_ID: &str = "path";

fn escape(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
        out
    })
}

/// Renders the picker as standalone SVG markup. Positions come from the picker's last
/// measurement.
pub fn render(picker: &Picker, arc: &ArcPath) -> String {
    let mut lines = vec![
        format!(
            r#"<svg id="picker" viewBox="0 0 {size} {size}" xmlns="{SVG_NS}" style="{}">"#,
            picker.vars().to_style(),
            size = VIEW_BOX,
        ),
        format!(
            r#"  <path id="{PATH_ID}" d="{}" fill="none" stroke="none"/>"#,
            arc.path_data()
        ),
        "  <text>".to_string(),
        format!(
            r##"    <textPath href="#{PATH_ID}" startOffset="{}" font-size="{}">"##,
            picker.start_offset(),
            picker.font_size()
        ),
    ];

    lines.extend(picker.layout().into_iter().map(|label| {
        format!(
            r#"      <tspan x="{}" style="--opacity: {}" data-index="{}"{}>{}</tspan>"#,
            round3(label.position),
            label.opacity,
            label.index,
            if label.active { r#" class="active""# } else { "" },
            escape(&label.label)
        )
    }));

    lines.extend(["    </textPath>", "  </text>", "</svg>"].map(String::from));

    let mut svg = lines.join("\n");
    svg.push('\n');
    svg
}
