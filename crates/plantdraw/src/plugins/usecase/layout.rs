//! Use-case diagram layout algorithm
//!
//! Three columns: primary actors on the left, use cases in the middle and
//! secondary actors on the right. Each column fills its own rows.

use anyhow::Result;

use super::database::{Entity, UseCaseDatabase};
use crate::core::text::LINE_BREAK;
use crate::core::{Bounds, LayoutAlgorithm, UseCaseSpacing};

/// Column an entity is placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PrimaryActors,
    UseCases,
    SecondaryActors,
}

/// Positioned actor or use case
#[derive(Debug, Clone)]
pub struct PositionedEntity {
    pub id: String,
    pub label: String,
    pub column: Column,
    pub row: usize,
    pub bounds: Bounds,
}

/// Layout result
#[derive(Debug, Default)]
pub struct UseCaseLayoutResult {
    pub entities: Vec<PositionedEntity>,
    /// System boundary around the use-case column, when a label was given
    pub boundary: Option<(String, Bounds)>,
}

impl UseCaseLayoutResult {
    pub fn in_column(&self, column: Column) -> impl Iterator<Item = &PositionedEntity> {
        self.entities.iter().filter(move |e| e.column == column)
    }
}

/// Label drawn under a secondary actor
pub fn secondary_label(name: &str) -> String {
    format!("<<system>>{}{}", LINE_BREAK, name)
}

/// Use-case diagram column layout
pub struct UseCaseLayoutAlgorithm {
    spacing: UseCaseSpacing,
}

impl UseCaseLayoutAlgorithm {
    pub fn new() -> Self {
        Self::with_spacing(UseCaseSpacing::default())
    }

    pub fn with_spacing(spacing: UseCaseSpacing) -> Self {
        Self { spacing }
    }

    fn place_column<'a>(
        &self,
        entities: impl Iterator<Item = &'a Entity>,
        column: Column,
        out: &mut Vec<PositionedEntity>,
    ) {
        let s = &self.spacing;
        let (x, width, height) = match column {
            Column::PrimaryActors => (s.primary_x, s.actor_width, s.actor_height),
            Column::UseCases => (s.usecase_x, s.usecase_width, s.usecase_height),
            Column::SecondaryActors => (s.secondary_x, s.actor_width, s.actor_height),
        };

        for (row, entity) in entities.enumerate() {
            let label = match column {
                Column::SecondaryActors => secondary_label(&entity.label),
                _ => entity.label.clone(),
            };
            out.push(PositionedEntity {
                id: entity.id.clone(),
                label,
                column,
                row,
                bounds: Bounds::new(x, s.origin_y + row as f64 * s.row_spacing, width, height),
            });
        }
    }
}

impl Default for UseCaseLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<UseCaseDatabase> for UseCaseLayoutAlgorithm {
    type Output = UseCaseLayoutResult;

    fn layout(&self, database: &UseCaseDatabase) -> Result<Self::Output> {
        let mut entities = Vec::with_capacity(database.entities().len());

        self.place_column(
            database.actors().filter(|a| !a.is_secondary()),
            Column::PrimaryActors,
            &mut entities,
        );
        self.place_column(database.use_cases(), Column::UseCases, &mut entities);
        self.place_column(
            database.actors().filter(|a| a.is_secondary()),
            Column::SecondaryActors,
            &mut entities,
        );

        let padding = self.spacing.boundary_padding;
        let boundary = database.system_label().and_then(|label| {
            let area = entities
                .iter()
                .filter(|e| e.column == Column::UseCases)
                .map(|e| e.bounds)
                .reduce(|a, b| a.union(&b))?;
            // extra room on top for the title
            let bounds = Bounds::new(
                area.x - padding,
                area.y - padding - 20.0,
                area.width + 2.0 * padding,
                area.height + 2.0 * padding + 20.0,
            );
            Some((label.to_string(), bounds))
        });

        Ok(UseCaseLayoutResult { entities, boundary })
    }

    fn name(&self) -> &'static str {
        "usecase-columns"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UseCaseDatabase {
        let mut db = UseCaseDatabase::new();
        db.add_entity(Entity::actor("User", "User", false)).unwrap();
        db.add_entity(Entity::use_case("UC1", "Browse")).unwrap();
        db.add_entity(Entity::actor("Bank", "Bank", true)).unwrap();
        db.add_entity(Entity::use_case("UC2", "Pay")).unwrap();
        db.add_entity(Entity::actor("Guest", "Guest", false)).unwrap();
        db
    }

    #[test]
    fn test_columns_and_rows() {
        let result = UseCaseLayoutAlgorithm::new().layout(&sample()).unwrap();

        let primary: Vec<_> = result
            .in_column(Column::PrimaryActors)
            .map(|e| (e.id.as_str(), e.bounds.x, e.bounds.y))
            .collect();
        assert_eq!(primary, vec![("User", 50.0, 100.0), ("Guest", 50.0, 220.0)]);

        let use_cases: Vec<_> = result
            .in_column(Column::UseCases)
            .map(|e| (e.bounds.x, e.bounds.y, e.bounds.width, e.bounds.height))
            .collect();
        assert_eq!(
            use_cases,
            vec![(250.0, 100.0, 140.0, 70.0), (250.0, 220.0, 140.0, 70.0)]
        );

        let secondary: Vec<_> = result.in_column(Column::SecondaryActors).collect();
        assert_eq!(secondary.len(), 1);
        assert_eq!(secondary[0].bounds.x, 450.0);
        assert_eq!(secondary[0].label, secondary_label("Bank"));
    }

    #[test]
    fn test_no_boundary_without_label() {
        let result = UseCaseLayoutAlgorithm::new().layout(&sample()).unwrap();
        assert!(result.boundary.is_none());
    }

    #[test]
    fn test_boundary_encloses_use_cases() {
        let mut db = sample();
        db.set_system_label("Shop");
        let result = UseCaseLayoutAlgorithm::new().layout(&db).unwrap();

        let (label, bounds) = result.boundary.clone().unwrap();
        assert_eq!(label, "Shop");
        for use_case in result.in_column(Column::UseCases) {
            assert!(bounds.x < use_case.bounds.x);
            assert!(bounds.y < use_case.bounds.y);
            assert!(bounds.right() > use_case.bounds.right());
            assert!(bounds.bottom() > use_case.bounds.bottom());
        }
    }
}
