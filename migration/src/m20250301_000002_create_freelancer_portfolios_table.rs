use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum FreelancerPortfolios {
    Table,
    Id,
    FreelancerId,
    ProjectName,
    ProjectDescription,
    ProjectUrl,
    ScreenshotUrl,
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
                    .table(FreelancerPortfolios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FreelancerPortfolios::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FreelancerPortfolios::FreelancerId).uuid().not_null())
                    .col(ColumnDef::new(FreelancerPortfolios::ProjectName).string().not_null())
                    .col(
                        ColumnDef::new(FreelancerPortfolios::ProjectDescription)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FreelancerPortfolios::ProjectUrl).string().not_null())
                    .col(ColumnDef::new(FreelancerPortfolios::ScreenshotUrl).string().null())
                    .col(
                        ColumnDef::new(FreelancerPortfolios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freelancer_portfolios_freelancer_id")
                            .from(FreelancerPortfolios::Table, FreelancerPortfolios::FreelancerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_freelancer_portfolios_freelancer_id")
                    .table(FreelancerPortfolios::Table)
                    .col(FreelancerPortfolios::FreelancerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FreelancerPortfolios::Table).to_owned())
            .await
    }
}
