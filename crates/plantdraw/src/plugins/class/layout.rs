//! Class diagram layout algorithm
//!
//! Classifiers fill a fixed-column grid in declaration order. Each row
//! starts below the tallest box of the row above it.

use anyhow::Result;

use super::database::{Class, ClassDatabase, ClassKind};
use crate::core::text::{label_lines, label_width, LINE_BREAK};
use crate::core::{Bounds, ClassSpacing, LayoutAlgorithm};

/// Line drawn between the name and each member section
const SECTION_RULE: &str = "────────────";

/// Approximate pixel width of one label column
const CHAR_WIDTH: f64 = 7.0;

/// Positioned classifier box
#[derive(Debug, Clone)]
pub struct PositionedClass {
    pub id: String,
    pub kind: ClassKind,
    /// Name, stereotype and member sections joined with line breaks
    pub label: String,
    pub bounds: Bounds,
    pub column: usize,
    pub row: usize,
}

/// Layout result
#[derive(Debug, Default)]
pub struct ClassLayoutResult {
    pub classes: Vec<PositionedClass>,
}

/// Build the multi-line box label of a classifier
pub fn class_label(class: &Class) -> String {
    let mut lines: Vec<&str> = Vec::new();
    if let Some(stereotype) = class.kind.stereotype() {
        lines.push(stereotype);
    }
    lines.push(&class.label);

    let fields: Vec<&str> = class
        .enumerants
        .iter()
        .map(String::as_str)
        .chain(class.attributes.iter().map(|m| m.text.as_str()))
        .collect();
    if !fields.is_empty() {
        lines.push(SECTION_RULE);
        lines.extend(fields);
    }
    if !class.methods.is_empty() {
        lines.push(SECTION_RULE);
        lines.extend(class.methods.iter().map(|m| m.text.as_str()));
    }

    lines.join(LINE_BREAK)
}

/// Class diagram grid layout
pub struct ClassLayoutAlgorithm {
    spacing: ClassSpacing,
}

impl ClassLayoutAlgorithm {
    pub fn new() -> Self {
        Self::with_spacing(ClassSpacing::default())
    }

    pub fn with_spacing(spacing: ClassSpacing) -> Self {
        Self { spacing }
    }

    fn box_size(&self, label: &str) -> (f64, f64) {
        let s = &self.spacing;
        let width = s
            .box_width
            .max(label_width(label) as f64 * CHAR_WIDTH + 20.0);
        let height = s.base_height + s.line_height * (label_lines(label) - 1) as f64;
        (width, height)
    }
}

impl Default for ClassLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<ClassDatabase> for ClassLayoutAlgorithm {
    type Output = ClassLayoutResult;

    fn layout(&self, database: &ClassDatabase) -> Result<Self::Output> {
        let s = &self.spacing;
        let columns = s.columns.max(1);

        let mut classes = Vec::with_capacity(database.classes().len());
        let mut row_y = s.origin_y;
        let mut row_height: f64 = 0.0;

        for (i, class) in database.classes().iter().enumerate() {
            let column = i % columns;
            let row = i / columns;
            if column == 0 && i > 0 {
                row_y += row_height + s.row_gap;
                row_height = 0.0;
            }

            let label = class_label(class);
            let (width, height) = self.box_size(&label);
            row_height = row_height.max(height);

            classes.push(PositionedClass {
                id: class.id.clone(),
                kind: class.kind,
                label,
                bounds: Bounds::new(
                    s.origin_x + column as f64 * s.column_spacing,
                    row_y,
                    width,
                    height,
                ),
                column,
                row,
            });
        }

        Ok(ClassLayoutResult { classes })
    }

    fn name(&self) -> &'static str {
        "class-grid"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
