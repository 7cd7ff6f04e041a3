//! Static HTML export: component list → self-contained HTML document.
//!
//! One absolutely-positioned element per component, in z-order. Horizontal
//! geometry (`left`, `width`) is written as a percentage of the canvas pixel
//! width so the page reflows with its container; vertical geometry (`top`,
//! `height`) stays in pixels. This is a one-way projection; it does not
//! round-trip.

use crate::model::{Component, ComponentKind, Props, format_number};
use std::fmt::{self, Write};

/// Emit the full document.
///
/// `canvas_width` is the container width percentage (10–100);
/// `canvas_pixel_width` is the live canvas width the positions were laid
/// out against.
#[must_use]
pub fn export_html(components: &[Component], canvas_width: u32, canvas_pixel_width: f64) -> String {
    let mut out = String::with_capacity(1024 + 320 * components.len());
    if let Err(e) = write_document(&mut out, components, canvas_width, canvas_pixel_width) {
        log::error!("export html: {e}");
    }
    out
}

fn write_document(
    out: &mut String,
    components: &[Component],
    canvas_width: u32,
    canvas_pixel_width: f64,
) -> fmt::Result {
    let mut css = String::with_capacity(256 * components.len());
    let mut body = String::with_capacity(64 * components.len());

    for (index, component) in components.iter().enumerate() {
        let class = format!("component-{index}");
        emit_component_css(&mut css, component, &class, canvas_pixel_width)?;
        css.push('\n');
        emit_component_html(&mut body, component, &class)?;
    }

    log::info!(
        "export html: {} components, canvas {}% of {}px",
        components.len(),
        canvas_width,
        canvas_pixel_width
    );

    out.push_str(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n  \
         <meta charset=\"UTF-8\">\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  \
         <title>Page Builder Export</title>\n  \
         <style>\n",
    );
    out.push_str(
        "    * {\n      box-sizing: border-box;\n      margin: 0;\n      padding: 0;\n    }\n\n",
    );
    out.push_str(
        "    body {\n      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, \
         Oxygen, Ubuntu, Cantarell, sans-serif;\n      background-color: #f5f5f5;\n      \
         position: relative;\n      min-height: 100vh;\n    }\n\n",
    );
    write!(
        out,
        "    .container {{\n      position: relative;\n      width: {canvas_width}%;\n      \
         min-height: 100vh;\n      background-color: #ffffff;\n      margin: 0 auto;\n      \
         max-width: 100%;\n    }}\n\n"
    )?;
    out.push_str(&css);
    out.push_str("  </style>\n</head>\n<body>\n  <div class=\"container\">\n");
    out.push_str(&body);
    out.push_str("  </div>\n</body>\n</html>\n");
    Ok(())
}

/// `value / canvas * 100` with two decimals; `0` for a zero-width canvas.
fn percent(value: f64, canvas_pixel_width: f64) -> String {
    if canvas_pixel_width > 0.0 {
        format!("{:.2}", value / canvas_pixel_width * 100.0)
    } else {
        "0".to_string()
    }
}

fn css_prop(props: &Props, key: &str) -> String {
    props.get(key).map(|v| v.to_css()).unwrap_or_default()
}

fn emit_component_css(
    out: &mut String,
    component: &Component,
    class: &str,
    canvas_px: f64,
) -> fmt::Result {
    let props = &component.props;
    let left = percent(component.position.x, canvas_px);
    let top = format_number(component.position.y);
    let width = percent(component.width(), canvas_px);
    let height = format_number(component.height());

    writeln!(out, "    .{class} {{")?;
    out.push_str("      position: absolute;\n");
    writeln!(out, "      left: {left}%;")?;
    writeln!(out, "      top: {top}px;")?;

    match component.kind {
        ComponentKind::Text => {
            writeln!(out, "      width: {width}%;")?;
            writeln!(out, "      height: {height}px;")?;
            writeln!(out, "      font-size: {}px;", css_prop(props, "fontSize"))?;
            writeln!(out, "      color: {};", css_prop(props, "color"))?;
            writeln!(out, "      font-weight: {};", css_prop(props, "fontWeight"))?;
            writeln!(out, "      text-align: {};", css_prop(props, "textAlign"))?;
            out.push_str("      display: flex;\n");
            out.push_str("      align-items: center;\n");
            out.push_str("      overflow: hidden;\n");
            out.push_str("      white-space: nowrap;\n");
            out.push_str("      text-overflow: ellipsis;\n");
        }
        ComponentKind::TextArea => {
            writeln!(out, "      width: {width}%;")?;
            writeln!(out, "      height: {height}px;")?;
            writeln!(out, "      font-size: {}px;", css_prop(props, "fontSize"))?;
            writeln!(out, "      color: {};", css_prop(props, "color"))?;
            writeln!(out, "      line-height: {};", css_prop(props, "lineHeight"))?;
            writeln!(out, "      text-align: {};", css_prop(props, "textAlign"))?;
            out.push_str("      overflow: auto;\n");
            out.push_str("      white-space: pre-wrap;\n");
            out.push_str("      word-wrap: break-word;\n");
        }
        ComponentKind::FlexBox => {
            writeln!(out, "      width: {width}%;")?;
            writeln!(out, "      height: {height}px;")?;
            writeln!(
                out,
                "      background-color: {};",
                css_prop(props, "backgroundColor")
            )?;
            writeln!(out, "      padding: {}px;", css_prop(props, "padding"))?;
            writeln!(out, "      border-radius: {}px;", css_prop(props, "borderRadius"))?;
            out.push_str("      border: 1px solid #e0e0e0;\n");
        }
        ComponentKind::Image => {
            writeln!(out, "      width: {width}%;")?;
            writeln!(out, "      height: {height}px;")?;
            writeln!(out, "      border-radius: {}px;", css_prop(props, "borderRadius"))?;
            out.push_str("      object-fit: cover;\n");
        }
        ComponentKind::Button => {
            // Buttons size from padding + font, so no width/height here.
            writeln!(out, "      padding: {}px;", css_prop(props, "padding"))?;
            writeln!(out, "      font-size: {}px;", css_prop(props, "fontSize"))?;
            writeln!(
                out,
                "      background-color: {};",
                css_prop(props, "backgroundColor")
            )?;
            writeln!(out, "      color: {};", css_prop(props, "color"))?;
            out.push_str("      border: none;\n");
            writeln!(out, "      border-radius: {}px;", css_prop(props, "borderRadius"))?;
            out.push_str("      cursor: pointer;\n");
        }
    }
    out.push_str("    }\n");
    Ok(())
}

fn emit_component_html(out: &mut String, component: &Component, class: &str) -> fmt::Result {
    let props = &component.props;
    let text = |key: &str| escape_html(props.text(key).unwrap_or_default());

    match component.kind {
        ComponentKind::Text | ComponentKind::TextArea => {
            writeln!(out, "    <div class=\"{class}\">{}</div>", text("content"))?;
        }
        ComponentKind::FlexBox => {
            writeln!(out, "    <div class=\"{class}\"></div>")?;
        }
        ComponentKind::Image => {
            writeln!(
                out,
                "    <img class=\"{class}\" src=\"{}\" alt=\"{}\" />",
                text("src"),
                text("alt")
            )?;
        }
        ComponentKind::Button => {
            let url = props.text("url").unwrap_or_default();
            let onclick = if url.is_empty() {
                String::new()
            } else {
                let js = url.replace('\\', "\\\\").replace('\'', "\\'");
                format!(" onclick=\"window.location.href='{}'\"", escape_html(&js))
            };
            writeln!(
                out,
                "    <button class=\"{class}\"{onclick}>{}</button>",
                text("text")
            )?;
        }
    }
    Ok(())
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
