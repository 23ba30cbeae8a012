//! Migration: Create the account, role, profile, and picture tables and
//! seed the two built-in roles.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuario::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuario::IdUsuario)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Usuario::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Usuario::Correo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuario::ContrasenaHash).string().not_null())
                    .col(ColumnDef::new(Usuario::EstadoCuenta).string().not_null())
                    .col(ColumnDef::new(Usuario::Instagram).string().null())
                    .col(ColumnDef::new(Usuario::Linkedin).string().null())
                    .col(ColumnDef::new(Usuario::Website).string().null())
                    .col(ColumnDef::new(Usuario::Github).string().null())
                    .col(
                        ColumnDef::new(Usuario::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rol::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rol::IdRol).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rol::Nombre).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UsuarioRol::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UsuarioRol::IdUsuario).uuid().not_null())
                    .col(ColumnDef::new(UsuarioRol::IdRol).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(UsuarioRol::IdUsuario)
                            .col(UsuarioRol::IdRol),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usuario_rol_usuario")
                            .from(UsuarioRol::Table, UsuarioRol::IdUsuario)
                            .to(Usuario::Table, Usuario::IdUsuario)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usuario_rol_rol")
                            .from(UsuarioRol::Table, UsuarioRol::IdRol)
                            .to(Rol::Table, Rol::IdRol)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PerfilProveedor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PerfilProveedor::IdProveedor)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PerfilProveedor::TipoProveedor)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerfilProveedor::IdentificacionNit)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PerfilProveedor::NombreLegal).string().null())
                    .col(
                        ColumnDef::new(PerfilProveedor::NombresApellidos)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(PerfilProveedor::Telefono).string().null())
                    .col(ColumnDef::new(PerfilProveedor::Direccion).string().null())
                    .col(ColumnDef::new(PerfilProveedor::Ciudad).string().null())
                    .col(
                        ColumnDef::new(PerfilProveedor::PortafolioResumen)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PerfilProveedor::Score)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_perfil_proveedor_usuario")
                            .from(PerfilProveedor::Table, PerfilProveedor::IdProveedor)
                            .to(Usuario::Table, Usuario::IdUsuario)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PerfilAdmin::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PerfilAdmin::IdAdmin)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PerfilAdmin::Nombre).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_perfil_admin_usuario")
                            .from(PerfilAdmin::Table, PerfilAdmin::IdAdmin)
                            .to(Usuario::Table, Usuario::IdUsuario)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pfps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pfps::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pfps::ImageBase64).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Seed the two built-in roles; registration fails without them.
        let insert_roles = Query::insert()
            .into_table(Rol::Table)
            .columns([Rol::IdRol, Rol::Nombre])
            .values_panic([uuid::Uuid::new_v4().into(), "Admin".into()])
            .values_panic([uuid::Uuid::new_v4().into(), "Proveedor".into()])
            .to_owned();
        manager.exec_stmt(insert_roles).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pfps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PerfilAdmin::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PerfilProveedor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UsuarioRol::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rol::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Usuario::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Usuario {
    Table,
    IdUsuario,
    Username,
    Correo,
    ContrasenaHash,
    EstadoCuenta,
    Instagram,
    Linkedin,
    Website,
    Github,
    CreatedAt,
}

#[derive(Iden)]
enum Rol {
    Table,
    IdRol,
    Nombre,
}

#[derive(Iden)]
enum UsuarioRol {
    Table,
    IdUsuario,
    IdRol,
}

#[derive(Iden)]
enum PerfilProveedor {
    Table,
    IdProveedor,
    TipoProveedor,
    IdentificacionNit,
    NombreLegal,
    NombresApellidos,
    Telefono,
    Direccion,
    Ciudad,
    PortafolioResumen,
    Score,
}

#[derive(Iden)]
enum PerfilAdmin {
    Table,
    IdAdmin,
    Nombre,
}

#[derive(Iden)]
enum Pfps {
    Table,
    Username,
    ImageBase64,
}
