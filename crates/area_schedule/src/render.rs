use crate::config::{Config, Variant};
use crate::group::{FileReport, Group};

use log::debug;

/// CSS classes of the text labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::AsRefStr, strum_macros::EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum StyleClass {
    /// file name heading of the `schedule` variant
    Title,
    MainTitle,
    FileTitle,
    FileTotal,
    Group,
    GroupArea,
    Item,
    Area,
}

/// Positioned text, kept unescaped until serialization
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub class: StyleClass,
    pub centered: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f64,
    pub height: f64,
    /// cursor position after the last row
    pub final_y: f64,
    pub labels: Vec<Label>,
}

impl Document {
    pub fn labels_with(&self, class: StyleClass) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(move |l| l.class == class)
    }
}

/// Walks the ordered reports top to bottom and places every label
pub fn render(reports: &[FileReport], config: &Config) -> Document {
    let mut walk = Walk {
        config,
        y: config.layout.start_y,
        labels: Vec::new(),
    };

    walk.heading(reports);
    for report in reports {
        walk.file(report);
    }

    let layout = &config.layout;
    let height = layout
        .page_height
        .max((walk.y + layout.bottom_margin).ceil());
    debug!(
        "Laid out {} labels, final y {}, canvas {}x{}",
        walk.labels.len(),
        walk.y,
        layout.page_width,
        height
    );

    Document {
        width: layout.page_width,
        height,
        final_y: walk.y,
        labels: walk.labels,
    }
}

pub fn grand_total(reports: &[FileReport]) -> f64 {
    reports.iter().map(|r| r.total).sum()
}

struct Walk<'a> {
    config: &'a Config,
    y: f64,
    labels: Vec<Label>,
}

impl Walk<'_> {
    fn push(&mut self, x: f64, y: f64, class: StyleClass, text: String) {
        self.labels.push(Label {
            x,
            y,
            class,
            centered: false,
            text,
        });
    }

    fn push_centered(&mut self, y: f64, class: StyleClass, text: String) {
        self.labels.push(Label {
            x: self.config.layout.page_width / 2.0,
            y,
            class,
            centered: true,
            text,
        });
    }

    /// Name on the left, area on the right, then one row down
    fn row(&mut self, name_x: f64, name: (StyleClass, String), area: (StyleClass, String)) {
        let (y, area_x) = (self.y, self.config.layout.area_x);
        self.push(name_x, y, name.0, name.1);
        self.push(area_x, y, area.0, area.1);
        self.y += self.config.layout.row_gap;
    }

    fn heading(&mut self, reports: &[FileReport]) {
        let config = self.config;
        let layout = &config.layout;
        match config.variant {
            Variant::Schedule => {
                let title = config
                    .title
                    .clone()
                    .or_else(|| reports.first().map(|r| r.label.clone()))
                    .unwrap_or_default();
                self.push_centered(layout.title_y, StyleClass::Title, title);
            }
            Variant::Floor | Variant::Combined => {
                let title = config
                    .title
                    .clone()
                    .or_else(|| config.variant.default_heading().map(str::to_string))
                    .unwrap_or_default();
                let total = config.units.format_pair(grand_total(reports));
                self.push_centered(layout.title_y, StyleClass::MainTitle, title);
                self.push_centered(layout.total_y, StyleClass::MainTitle, total);
            }
        }
    }

    fn file(&mut self, report: &FileReport) {
        let config = self.config;
        let layout = &config.layout;
        if config.variant.shows_file_headers() {
            let total = config.units.format_pair(report.total);
            let (y, name_x, area_x) = (self.y, layout.name_x, layout.area_x);
            self.push(name_x, y, StyleClass::FileTitle, report.label.clone());
            self.push(area_x, y, StyleClass::FileTotal, total);
            self.y += layout.row_gap + layout.file_title_gap;
        }

        for group in &report.groups {
            self.group(group);
        }

        self.y += layout.file_gap;
    }

    fn group(&mut self, group: &Group) {
        let config = self.config;
        let layout = &config.layout;

        if let [item] = group.items.as_slice() {
            self.row(
                layout.name_x,
                (StyleClass::Group, item.name.clone()),
                (StyleClass::GroupArea, config.units.format_pair(item.area)),
            );
            return;
        }

        self.row(
            layout.name_x,
            (StyleClass::Group, group.key.clone()),
            (
                StyleClass::GroupArea,
                format!("(Total: {})", config.units.format_pair(group.total)),
            ),
        );
        for item in &group.items {
            self.row(
                layout.name_x + layout.indent,
                (StyleClass::Item, item.name.clone()),
                (StyleClass::Area, config.units.format_pair(item.area)),
            );
        }
        self.y += layout.group_gap;
    }
}
