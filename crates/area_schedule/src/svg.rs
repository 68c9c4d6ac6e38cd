use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{Config, StyleConfig, Variant};
use crate::constants::TITLE_SIZE_BONUS;
use crate::error::{Result, ScheduleError};
use crate::render::{Document, StyleClass};

/// HTMLエンコード（SVGテキスト用）
pub fn html_encode(text: &str) -> String {
    text.replace("&", "&amp;")
        .replace("<", "&lt;")
        .replace(">", "&gt;")
        .replace("\"", "&quot;")
        .replace("'", "&#x27;")
}

/// Style rules emitted in the header, in order
pub fn style_classes(variant: Variant) -> &'static [StyleClass] {
    use StyleClass::*;
    match variant {
        Variant::Schedule => &[Title, Group, Item, Area, GroupArea],
        Variant::Floor => &[MainTitle, Group, Item, Area, GroupArea],
        Variant::Combined => &[MainTitle, FileTitle, Group, Item, Area, GroupArea, FileTotal],
    }
}

struct ClassRule<'a> {
    family: &'a str,
    size: f64,
    bold: bool,
    fill: &'a str,
    anchor_end: bool,
}

fn class_rule(class: StyleClass, style: &StyleConfig) -> ClassRule<'_> {
    let (size, fill, anchor_end) = match class {
        StyleClass::Title => (style.group_size + TITLE_SIZE_BONUS, &style.title_color, false),
        StyleClass::MainTitle => (style.main_title_size, &style.main_title_color, false),
        StyleClass::FileTitle => (style.file_title_size, &style.file_title_color, false),
        StyleClass::FileTotal => (style.file_title_size, &style.file_title_color, true),
        StyleClass::Group => (style.group_size, &style.group_color, false),
        StyleClass::GroupArea => (style.group_size, &style.group_color, true),
        StyleClass::Item => (style.item_size, &style.item_color, false),
        StyleClass::Area => (style.item_size, &style.area_color, true),
    };
    // item rows use the light face, everything else is bold regular
    let light = matches!(class, StyleClass::Item | StyleClass::Area);
    let family = if light {
        style.font_light.as_str()
    } else {
        style.font_regular.as_str()
    };

    ClassRule {
        family,
        size,
        bold: !light,
        fill: fill.as_str(),
        anchor_end,
    }
}

fn write_header<W: Write>(w: &mut W, doc: &Document, config: &Config) -> std::io::Result<()> {
    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(w, r#"<svg xmlns="http://www.w3.org/2000/svg""#)?;
    writeln!(
        w,
        r#"     width="{w}" height="{h}""#,
        w = doc.width,
        h = doc.height
    )?;
    writeln!(
        w,
        r#"     viewBox="0 0 {w} {h}">"#,
        w = doc.width,
        h = doc.height
    )?;
    writeln!(w)?;
    writeln!(w, "<style>")?;

    let style = &config.style;
    if !style.font_import_url.is_empty() {
        writeln!(
            w,
            "  @import url('{}');",
            html_encode(&style.font_import_url)
        )?;
    }

    for &class in style_classes(config.variant) {
        let rule = class_rule(class, style);
        writeln!(w, "  .{} {{", class.as_ref())?;
        writeln!(w, r#"    font-family: "{}", sans-serif;"#, html_encode(rule.family))?;
        writeln!(w, "    font-size: {}px;", rule.size)?;
        if rule.bold {
            writeln!(w, "    font-weight: bold;")?;
        }
        writeln!(w, "    fill: {};", html_encode(rule.fill))?;
        if rule.anchor_end {
            writeln!(w, "    text-anchor: end;")?;
        }
        writeln!(w, "  }}")?;
    }
    writeln!(w, "</style>")?;
    Ok(())
}

/// Header, one `<text>` per label, footer
pub fn write_svg<W: Write>(w: &mut W, doc: &Document, config: &Config) -> std::io::Result<()> {
    write_header(w, doc, config)?;

    for label in &doc.labels {
        let anchor = if label.centered {
            r#" text-anchor="middle""#
        } else {
            ""
        };
        writeln!(
            w,
            r#"<text x="{x}" y="{y}" class="{class}"{anchor}>{text}</text>"#,
            x = label.x,
            y = label.y,
            class = label.class.as_ref(),
            anchor = anchor,
            text = html_encode(&label.text)
        )?;
    }

    writeln!(w, "</svg>")?;
    Ok(())
}

pub fn to_svg_string(doc: &Document, config: &Config) -> Result<String> {
    let mut buf = Vec::new();
    write_svg(&mut buf, doc, config)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 指定パスにSVGを保存
pub fn save_svg<P: AsRef<Path>>(output_path: P, doc: &Document, config: &Config) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path).map_err(|source| ScheduleError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut w = BufWriter::new(file);
    write_svg(&mut w, doc, config)
        .and_then(|()| w.flush())
        .map_err(|source| ScheduleError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
}
