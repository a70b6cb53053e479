//! SQL query builder for provider searches.
//!
//! Builds the data query and its companion count query from one normalized
//! `FilterCriteria`:
//! - equality-set filters (`city`, `gender`) as `= ANY($n)`
//! - mode filters as array-overlap tests against the fixed variant lists
//! - numeric range filters from the bucket tables
//! - free-text search: substring probes for short queries, indexed
//!   full-text search otherwise
//! - deterministic sort plus skip/limit windowing (data query only)

use super::criteria::FilterCriteria;
use super::escape::escape_like_pattern;

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
}

fn push_text(binds: &mut Vec<BindValue>, value: String) -> usize {
    binds.push(BindValue::Text(value));
    binds.len()
}

fn push_text_array(binds: &mut Vec<BindValue>, values: Vec<String>) -> usize {
    binds.push(BindValue::TextArray(values));
    binds.len()
}

const PROVIDER_COLUMNS: &str = "p.id, p.name, p.profile_url, p.gender, p.city, \
     p.experience_years, p.email, p.phone, p.modes, p.education, p.prior_roles, \
     p.specialties, p.about, p.fees_raw, p.fee_amount, p.fee_currency, p.created_at";

/// Query builder for the provider list endpoint.
#[derive(Debug)]
pub struct ProviderQuery<'a> {
    criteria: &'a FilterCriteria,
}

impl<'a> ProviderQuery<'a> {
    pub fn new(criteria: &'a FilterCriteria) -> Self {
        Self { criteria }
    }

    /// Data query: filtered, sorted by name with id as the stable tie-break,
    /// windowed to the requested page.
    pub fn build_sql(&self) -> (String, Vec<BindValue>) {
        let mut binds = Vec::new();
        let mut sql = format!("SELECT {PROVIDER_COLUMNS} FROM providers p");
        self.push_where(&mut sql, &mut binds);
        sql.push_str(" ORDER BY p.name ASC, p.id ASC");
        sql.push_str(&format!(
            " LIMIT {} OFFSET {}",
            self.criteria.limit,
            self.criteria.offset()
        ));
        (sql, binds)
    }

    /// Count query: identical predicates, no sort or window, so `total` is
    /// independent of the page.
    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let mut binds = Vec::new();
        let mut sql = String::from("SELECT COUNT(*) FROM providers p");
        self.push_where(&mut sql, &mut binds);
        (sql, binds)
    }

    fn push_where(&self, sql: &mut String, binds: &mut Vec<BindValue>) {
        let mut clauses = Vec::new();

        if let Some(clause) = self.search_clause(binds) {
            clauses.push(clause);
        }

        if !self.criteria.cities.is_empty() {
            let idx = push_text_array(binds, self.criteria.cities.clone());
            clauses.push(format!("p.city = ANY(${idx})"));
        }

        if !self.criteria.genders.is_empty() {
            let idx = push_text_array(binds, self.criteria.genders.clone());
            clauses.push(format!("p.gender = ANY(${idx})"));
        }

        if let Some(clause) = self.mode_clause(binds) {
            clauses.push(clause);
        }

        if let Some(bucket) = self.criteria.experience {
            clauses.push(format!("({})", bucket.sql_predicate("p.experience_years")));
        }

        if let Some(bucket) = self.criteria.fee_range {
            clauses.push(format!("({})", bucket.sql_predicate("p.fee_amount")));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
    }

    fn search_clause(&self, binds: &mut Vec<BindValue>) -> Option<String> {
        let term = self.criteria.search.as_str();
        if term.is_empty() {
            return None;
        }

        if self.criteria.uses_substring_search() {
            let pattern = format!("%{}%", escape_like_pattern(term));
            let idx = push_text(binds, pattern);
            return Some(format!(
                "(p.name ILIKE ${idx} OR p.about ILIKE ${idx} \
                 OR EXISTS (SELECT 1 FROM unnest(p.specialties) s WHERE s ILIKE ${idx}) \
                 OR EXISTS (SELECT 1 FROM unnest(p.education) e WHERE e ILIKE ${idx}))"
            ));
        }

        // OR semantics across whitespace-separated terms, matching the
        // text-search contract of the list endpoint.
        let query = term.split_whitespace().collect::<Vec<_>>().join(" OR ");
        let idx = push_text(binds, query);
        Some(format!(
            "to_tsvector('simple', provider_search_text(p.name, p.about, p.specialties, p.education)) \
             @@ websearch_to_tsquery('simple', ${idx})"
        ))
    }

    fn mode_clause(&self, binds: &mut Vec<BindValue>) -> Option<String> {
        if self.criteria.modes.is_empty() {
            return None;
        }

        let mut parts = Vec::new();
        for selection in &self.criteria.modes {
            let idx = push_text_array(binds, selection.match_values());
            parts.push(format!("p.modes && ${idx}"));
        }

        if parts.len() == 1 {
            Some(parts.remove(0))
        } else {
            Some(format!("({})", parts.join(" OR ")))
        }
    }
}
