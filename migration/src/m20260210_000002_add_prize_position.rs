use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveIden)]
enum RafflePrizes {
    Table,
    Position,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// El orden de los premios pasaba por created_at, que no es confiable como
/// orden (relojes, datos cargados a mano). Columna `position` explícita,
/// backfill desde el orden de creación.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(RafflePrizes::Table)
                    .add_column(
                        ColumnDef::new(RafflePrizes::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                r#"
UPDATE raffle_prizes rp
   SET position = sub.rn
  FROM (
        SELECT id,
               ROW_NUMBER() OVER (PARTITION BY raffle_id ORDER BY created_at, id) AS rn
          FROM raffle_prizes
       ) sub
 WHERE rp.id = sub.id;
"#
                .to_owned(),
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(RafflePrizes::Table)
                    .drop_column(RafflePrizes::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
