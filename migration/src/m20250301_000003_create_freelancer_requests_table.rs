use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum FreelancerRequests {
    Table,
    Id,
    ClientId,
    FreelancerId,
    Name,
    Email,
    ProjectName,
    Description,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FreelancerRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FreelancerRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FreelancerRequests::ClientId).uuid().not_null())
                    .col(ColumnDef::new(FreelancerRequests::FreelancerId).uuid().not_null())
                    .col(ColumnDef::new(FreelancerRequests::Name).string().not_null())
                    .col(ColumnDef::new(FreelancerRequests::Email).string().not_null())
                    .col(ColumnDef::new(FreelancerRequests::ProjectName).string().not_null())
                    .col(ColumnDef::new(FreelancerRequests::Description).text().not_null())
                    .col(
                        ColumnDef::new(FreelancerRequests::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(FreelancerRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freelancer_requests_client_id")
                            .from(FreelancerRequests::Table, FreelancerRequests::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freelancer_requests_freelancer_id")
                            .from(FreelancerRequests::Table, FreelancerRequests::FreelancerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Incoming requests by freelancer
        manager
            .create_index(
                Index::create()
                    .name("idx_freelancer_requests_freelancer_id")
                    .table(FreelancerRequests::Table)
                    .col(FreelancerRequests::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // Outgoing requests by client
        manager
            .create_index(
                Index::create()
                    .name("idx_freelancer_requests_client_id")
                    .table(FreelancerRequests::Table)
                    .col(FreelancerRequests::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FreelancerRequests::Table).to_owned())
            .await
    }
}
