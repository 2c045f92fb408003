//! Configuración de conexión a PostgreSQL
//!
//! Crea el pool y asegura que la tabla `vehicles` exista.

use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!("🔌 Conectando a {}", config.masked_url());
    let pool = config.create_pool().await?;

    // Verificar que la conexión funciona
    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("✅ Conexión a PostgreSQL establecida");

    Ok(pool)
}

const CREATE_VEHICLES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id BIGSERIAL PRIMARY KEY,
    license_plate VARCHAR(10) NOT NULL,
    status VARCHAR(16) NOT NULL CHECK (status IN ('Available', 'InUse', 'Maintenance')),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

// Matrículas únicas sin distinguir mayúsculas
const CREATE_LICENSE_PLATE_INDEX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS vehicles_license_plate_lower_key
    ON vehicles (LOWER(license_plate))
"#;

/// Crear la tabla `vehicles` si no existe
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_VEHICLES_TABLE).execute(pool).await?;
    sqlx::query(CREATE_LICENSE_PLATE_INDEX).execute(pool).await?;
    info!("📋 Tabla vehicles lista");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleStatus;

    #[test]
    fn test_schema_check_matches_status_enum() {
        for status in VehicleStatus::ALL {
            assert!(CREATE_VEHICLES_TABLE.contains(&format!("'{}'", status)));
        }
    }

    #[test]
    fn test_plate_uniqueness_ignores_case() {
        assert!(!CREATE_VEHICLES_TABLE.contains("UNIQUE"));
        assert!(CREATE_LICENSE_PLATE_INDEX.contains("UNIQUE INDEX"));
        assert!(CREATE_LICENSE_PLATE_INDEX.contains("LOWER(license_plate)"));
    }
}
