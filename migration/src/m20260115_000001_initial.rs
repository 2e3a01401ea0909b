use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

/// Segments (rubros de socios)
#[derive(DeriveIden)]
enum Segments {
    Table,
    Id,
    Name,
    CreatedAt,
}

/// Members (socios del centro comercial)
#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
    MemberNumber,
    BusinessName,
    TradeName,
    LegalForm,
    TaxId,
    MemberType,
    PaymentMethod,
    MonthlyFee,
    FeeUpToDate,
    Street,
    StreetNumber,
    City,
    FirstName,
    LastName,
    MobilePhone,
    Email,
    SegmentId,
    CreatedAt,
    UpdatedAt,
}

/// Comercios (perfil público + secret_code para el sorteo)
#[derive(DeriveIden)]
enum Comercios {
    Table,
    Id,
    MemberId,
    Slug,
    FantasyName,
    LogoUrl,
    ShortDescription,
    Instagram,
    Facebook,
    Website,
    Whatsapp,
    DisplayAddress,
    SecretCode,
    Active,
    CreatedAt,
    UpdatedAt,
}

/// Discounts (descuentos por comercio)
#[derive(DeriveIden)]
enum Discounts {
    Table,
    Id,
    ComercioId,
    Title,
    Description,
    Featured,
    Active,
    CreatedAt,
    UpdatedAt,
}

/// Raffles (sorteos)
#[derive(DeriveIden)]
enum Raffles {
    Table,
    Id,
    Name,
    RaffleDate,
    Active,
    TicketSeq,
    CreatedAt,
    UpdatedAt,
}

/// Raffle Participants (participaciones, una por comercio/teléfono)
#[derive(DeriveIden)]
enum RaffleParticipants {
    Table,
    Id,
    RaffleId,
    ComercioId,
    Name,
    Whatsapp,
    TicketNumber,
    CreatedAt,
}

/// Raffle Prizes (premios de cada sorteo)
#[derive(DeriveIden)]
enum RafflePrizes {
    Table,
    Id,
    RaffleId,
    Name,
    Description,
    ImageUrl,
    WinnerParticipantId,
    CreatedAt,
}

/// Admin Users (usuarios del panel de administración)
#[derive(DeriveIden)]
enum AdminUsers {
    Table,
    Id,
    Email,
    PasswordHash,
    DisplayName,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Esquema inicial.
///
/// Reglas que viven en la base y no en la aplicación:
/// - Índice UNIQUE sobre (raffle_id, comercio_id, whatsapp): una participación
///   por teléfono por comercio en cada sorteo. La app interpreta la violación
///   como "ya participó", nunca la pre-chequea con un SELECT.
/// - ticket_number lo asigna un trigger BEFORE INSERT incrementando
///   raffles.ticket_seq bajo el lock de fila del sorteo: secuencial y
///   monótono por sorteo, la app solo lo recibe.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // rubros
        manager
            .create_table(
                Table::create()
                    .table(Segments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Segments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Segments::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Segments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_segments_name_unique")
                    .table(Segments::Table)
                    .col(Segments::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // socios
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Members::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Members::MemberNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Members::BusinessName).string_len(255).null())
                    .col(ColumnDef::new(Members::TradeName).string_len(255).null())
                    .col(ColumnDef::new(Members::LegalForm).string_len(100).null())
                    .col(ColumnDef::new(Members::TaxId).string_len(50).null())
                    .col(ColumnDef::new(Members::MemberType).string_len(50).null())
                    .col(ColumnDef::new(Members::PaymentMethod).string_len(50).null())
                    .col(ColumnDef::new(Members::MonthlyFee).big_integer().null())
                    .col(
                        ColumnDef::new(Members::FeeUpToDate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Members::Street).string_len(255).null())
                    .col(ColumnDef::new(Members::StreetNumber).string_len(20).null())
                    .col(ColumnDef::new(Members::City).string_len(100).null())
                    .col(ColumnDef::new(Members::FirstName).string_len(100).null())
                    .col(ColumnDef::new(Members::LastName).string_len(100).null())
                    .col(ColumnDef::new(Members::MobilePhone).string_len(30).null())
                    .col(ColumnDef::new(Members::Email).string_len(255).null())
                    .col(ColumnDef::new(Members::SegmentId).big_integer().null())
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Members::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_segment")
                            .from(Members::Table, Members::SegmentId)
                            .to(Segments::Table, Segments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_members_member_number_unique")
                    .table(Members::Table)
                    .col(Members::MemberNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // comercios
        manager
            .create_table(
                Table::create()
                    .table(Comercios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comercios::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comercios::MemberId).big_integer().not_null())
                    .col(ColumnDef::new(Comercios::Slug).string_len(100).not_null())
                    .col(ColumnDef::new(Comercios::FantasyName).string_len(255).null())
                    .col(ColumnDef::new(Comercios::LogoUrl).string_len(500).null())
                    .col(ColumnDef::new(Comercios::ShortDescription).text().null())
                    .col(ColumnDef::new(Comercios::Instagram).string_len(255).null())
                    .col(ColumnDef::new(Comercios::Facebook).string_len(255).null())
                    .col(ColumnDef::new(Comercios::Website).string_len(255).null())
                    .col(ColumnDef::new(Comercios::Whatsapp).string_len(30).null())
                    .col(ColumnDef::new(Comercios::DisplayAddress).string_len(255).null())
                    .col(
                        ColumnDef::new(Comercios::SecretCode)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Comercios::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Comercios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Comercios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comercios_member")
                            .from(Comercios::Table, Comercios::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comercios_slug_unique")
                    .table(Comercios::Table)
                    .col(Comercios::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // el código secreto es el token de acceso al sorteo: único sí o sí
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comercios_secret_code_unique")
                    .table(Comercios::Table)
                    .col(Comercios::SecretCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // descuentos
        manager
            .create_table(
                Table::create()
                    .table(Discounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Discounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Discounts::ComercioId).big_integer().not_null())
                    .col(ColumnDef::new(Discounts::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Discounts::Description).text().null())
                    .col(
                        ColumnDef::new(Discounts::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Discounts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Discounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Discounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discounts_comercio")
                            .from(Discounts::Table, Discounts::ComercioId)
                            .to(Comercios::Table, Comercios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // sorteos
        manager
            .create_table(
                Table::create()
                    .table(Raffles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Raffles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Raffles::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Raffles::RaffleDate).date().null())
                    .col(
                        ColumnDef::new(Raffles::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Raffles::TicketSeq)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Raffles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Raffles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // participaciones
        manager
            .create_table(
                Table::create()
                    .table(RaffleParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RaffleParticipants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RaffleParticipants::RaffleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RaffleParticipants::ComercioId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RaffleParticipants::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RaffleParticipants::Whatsapp)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RaffleParticipants::TicketNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RaffleParticipants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_raffle_participants_raffle")
                            .from(RaffleParticipants::Table, RaffleParticipants::RaffleId)
                            .to(Raffles::Table, Raffles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_raffle_participants_comercio")
                            .from(RaffleParticipants::Table, RaffleParticipants::ComercioId)
                            .to(Comercios::Table, Comercios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // una participación por (sorteo, comercio, teléfono)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_raffle_participants_once_per_comercio")
                    .table(RaffleParticipants::Table)
                    .col(RaffleParticipants::RaffleId)
                    .col(RaffleParticipants::ComercioId)
                    .col(RaffleParticipants::Whatsapp)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // el número de talón no se repite dentro de un sorteo
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_raffle_participants_ticket")
                    .table(RaffleParticipants::Table)
                    .col(RaffleParticipants::RaffleId)
                    .col(RaffleParticipants::TicketNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // premios
        manager
            .create_table(
                Table::create()
                    .table(RafflePrizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RafflePrizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RafflePrizes::RaffleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RafflePrizes::Name).string_len(255).not_null())
                    .col(ColumnDef::new(RafflePrizes::Description).text().null())
                    .col(ColumnDef::new(RafflePrizes::ImageUrl).string_len(500).null())
                    .col(
                        ColumnDef::new(RafflePrizes::WinnerParticipantId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RafflePrizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_raffle_prizes_raffle")
                            .from(RafflePrizes::Table, RafflePrizes::RaffleId)
                            .to(Raffles::Table, Raffles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_raffle_prizes_winner")
                            .from(RafflePrizes::Table, RafflePrizes::WinnerParticipantId)
                            .to(RaffleParticipants::Table, RaffleParticipants::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // usuarios del panel
        manager
            .create_table(
                Table::create()
                    .table(AdminUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminUsers::Email).string_len(255).not_null())
                    .col(
                        ColumnDef::new(AdminUsers::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdminUsers::DisplayName).string_len(100).null())
                    .col(
                        ColumnDef::new(AdminUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admin_users_email_unique")
                    .table(AdminUsers::Table)
                    .col(AdminUsers::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Asignación de ticket_number: UPDATE sobre la fila del sorteo toma su
        // row lock, serializando las inserciones concurrentes del mismo sorteo.
        let backend = manager.get_database_backend();
        manager
            .get_connection()
            .execute(Statement::from_string(
                backend,
                r#"
CREATE OR REPLACE FUNCTION assign_raffle_ticket_number() RETURNS trigger AS $$
BEGIN
    UPDATE raffles
       SET ticket_seq = ticket_seq + 1
     WHERE id = NEW.raffle_id
    RETURNING ticket_seq INTO NEW.ticket_number;

    IF NEW.ticket_number IS NULL THEN
        RAISE EXCEPTION 'raffle % does not exist', NEW.raffle_id;
    END IF;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
"#
                .to_owned(),
            ))
            .await?;

        manager
            .get_connection()
            .execute(Statement::from_string(
                backend,
                r#"
CREATE TRIGGER trg_assign_raffle_ticket_number
BEFORE INSERT ON raffle_participants
FOR EACH ROW EXECUTE FUNCTION assign_raffle_ticket_number();
"#
                .to_owned(),
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        manager
            .get_connection()
            .execute(Statement::from_string(
                backend,
                "DROP TRIGGER IF EXISTS trg_assign_raffle_ticket_number ON raffle_participants;"
                    .to_owned(),
            ))
            .await?;
        manager
            .get_connection()
            .execute(Statement::from_string(
                backend,
                "DROP FUNCTION IF EXISTS assign_raffle_ticket_number();".to_owned(),
            ))
            .await?;

        manager
            .drop_table(Table::drop().table(AdminUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RafflePrizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RaffleParticipants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Raffles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Discounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comercios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Segments::Table).to_owned())
            .await?;

        Ok(())
    }
}
