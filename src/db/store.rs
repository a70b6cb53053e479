//! PostgreSQL-backed provider store

use crate::{
    db::search::{
        criteria::{experience_case_expr, experience_facet_counts, fee_case_expr, fee_facet_counts},
        modes::consolidate_mode_counts,
        BindValue, FilterCriteria, ProviderQuery,
    },
    db::traits::ProviderStore,
    models::{FacetCount, FilterOptions, NewProvider, ProviderPage, ProviderRecord},
    Result,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Provider store over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PostgresProviderStore {
    pool: PgPool,
}

impl PostgresProviderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_page(
        &self,
        conn: &mut PgConnection,
        query: &ProviderQuery<'_>,
    ) -> Result<Vec<ProviderRecord>> {
        let (sql, binds) = query.build_sql();

        let mut q = sqlx::query_as::<_, ProviderRecord>(&sql);
        for value in binds {
            q = match value {
                BindValue::Text(v) => q.bind(v),
                BindValue::TextArray(vs) => q.bind(vs),
            };
        }

        let rows = q.fetch_all(&mut *conn).await.map_err(crate::Error::Database)?;
        Ok(rows)
    }

    async fn count_total(
        &self,
        conn: &mut PgConnection,
        query: &ProviderQuery<'_>,
    ) -> Result<i64> {
        let (sql, binds) = query.build_count_sql();

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        for value in binds {
            q = match value {
                BindValue::Text(v) => q.bind(v),
                BindValue::TextArray(vs) => q.bind(vs),
            };
        }

        let total = q.fetch_one(&mut *conn).await.map_err(crate::Error::Database)?;
        Ok(total)
    }

    async fn grouped_counts(&self, sql: &str) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (Option<String>, i64)>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(rows
            .into_iter()
            .filter_map(|(key, count)| key.map(|k| (k, count)))
            .collect())
    }
}

#[async_trait]
impl ProviderStore for PostgresProviderStore {
    async fn search(&self, criteria: &FilterCriteria) -> Result<ProviderPage> {
        let query = ProviderQuery::new(criteria);

        // Data and count run on the same pooled connection, which is as close
        // to a consistent snapshot as this read path needs.
        let mut conn = self.pool.acquire().await.map_err(crate::Error::Database)?;
        let data = self.fetch_page(&mut conn, &query).await?;
        let total = self.count_total(&mut conn, &query).await?;

        Ok(ProviderPage {
            page: criteria.page,
            limit: criteria.limit,
            total,
            data,
        })
    }

    async fn get(&self, id: Uuid) -> Result<Option<ProviderRecord>> {
        let record = sqlx::query_as::<_, ProviderRecord>(
            "SELECT p.id, p.name, p.profile_url, p.gender, p.city, p.experience_years, \
             p.email, p.phone, p.modes, p.education, p.prior_roles, p.specialties, \
             p.about, p.fees_raw, p.fee_amount, p.fee_currency, p.created_at \
             FROM providers p WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(crate::Error::Database)?;

        Ok(record)
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        let city_counts = self
            .grouped_counts(
                "SELECT p.city AS key, COUNT(*) AS count FROM providers p \
                 GROUP BY p.city ORDER BY count DESC, key ASC",
            )
            .await?
            .into_iter()
            .map(|(key, count)| FacetCount::new(key, count))
            .collect();

        let gender_counts = self
            .grouped_counts(
                "SELECT p.gender AS key, COUNT(*) AS count FROM providers p \
                 GROUP BY p.gender ORDER BY count DESC, key ASC",
            )
            .await?
            .into_iter()
            .map(|(key, count)| FacetCount::new(key, count))
            .collect();

        // Raw label occurrences, consolidated into the two canonical buckets.
        let raw_mode_counts = self
            .grouped_counts(
                "SELECT m AS key, COUNT(*) AS count FROM providers p \
                 CROSS JOIN LATERAL unnest(p.modes) AS m GROUP BY m",
            )
            .await?;
        let mode_counts = consolidate_mode_counts(&raw_mode_counts);

        let experience_sql = format!(
            "SELECT {} AS key, COUNT(*) AS count FROM providers p GROUP BY 1",
            experience_case_expr("p.experience_years")
        );
        let experience_counts = experience_facet_counts(&self.grouped_counts(&experience_sql).await?);

        let fee_sql = format!(
            "SELECT {} AS key, COUNT(*) AS count FROM providers p GROUP BY 1",
            fee_case_expr("p.fee_amount")
        );
        let fee_range_counts = fee_facet_counts(&self.grouped_counts(&fee_sql).await?);

        Ok(FilterOptions {
            city_counts,
            gender_counts,
            mode_counts,
            experience_counts,
            fee_range_counts,
        })
    }

    async fn replace_all(&self, records: Vec<NewProvider>) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(crate::Error::Database)?;

        sqlx::query("DELETE FROM providers")
            .execute(&mut *tx)
            .await
            .map_err(crate::Error::Database)?;

        let mut inserted = 0u64;
        for record in records {
            sqlx::query(
                "INSERT INTO providers (id, name, profile_url, gender, city, \
                 experience_years, email, phone, modes, education, prior_roles, \
                 specialties, about, fees_raw, fee_amount, fee_currency, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
            )
            .bind(Uuid::new_v4())
            .bind(&record.name)
            .bind(&record.profile_url)
            .bind(&record.gender)
            .bind(&record.city)
            .bind(record.experience_years)
            .bind(&record.email)
            .bind(&record.phone)
            .bind(&record.modes)
            .bind(&record.education)
            .bind(&record.prior_roles)
            .bind(&record.specialties)
            .bind(&record.about)
            .bind(&record.fees_raw)
            .bind(record.fee_amount)
            .bind(&record.fee_currency)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(crate::Error::Database)?;
            inserted += 1;
        }

        tx.commit().await.map_err(crate::Error::Database)?;
        Ok(inserted)
    }
}
