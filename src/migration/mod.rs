//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_authors;
mod m20260301_000002_create_categories_and_tags;
mod m20260301_000003_create_recipes;
mod m20260301_000004_create_recipe_tags;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_authors::Migration),
            Box::new(m20260301_000002_create_categories_and_tags::Migration),
            Box::new(m20260301_000003_create_recipes::Migration),
            Box::new(m20260301_000004_create_recipe_tags::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_by_name() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 4);
    }
}
