// src/models/report.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    auth::{Role, User},
    sale::{SaleStatus, SaleType},
};

// ---
// Seleção de período
// ---

// Período do relatório, resolvido para um intervalo fechado [início, fim].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Period {
    // Mapeia os parâmetros crus da query string. Sem período informado,
    // o padrão é "hoje"; um valor desconhecido cai no intervalo customizado.
    pub fn from_query(
        period: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        match period {
            None | Some("today") => Period::Today,
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            Some(_) => Period::Custom { start, end },
        }
    }

    // Resolve para datas concretas. Limites customizados ausentes
    // assumem o dia corrente.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Today => (today, today),
            Period::Week => (today - chrono::Duration::days(7), today),
            Period::Month => (today - chrono::Duration::days(30), today),
            Period::Custom { start, end } => (start.unwrap_or(today), end.unwrap_or(today)),
        }
    }
}

// ---
// Visibilidade
// ---

// Quem está olhando o relatório. O escopo é decidido aqui, uma única vez,
// e passado explicitamente às queries em vez de reconsultado por chamada.
#[derive(Debug, Clone, Copy)]
pub struct ReportViewer {
    pub role: Role,
    pub user_id: i64,
}

impl ReportViewer {
    pub fn from_user(user: &User) -> Self {
        Self {
            role: user.role,
            user_id: user.id,
        }
    }

    // `None` = enxerga tudo (admin); `Some(id)` = apenas os próprios registros.
    pub fn scope(&self) -> Option<i64> {
        match self.role {
            Role::Admin => None,
            Role::Gestionnaire => Some(self.user_id),
        }
    }
}

// ---
// Linhas de detalhe e agregados
// ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleReportRow {
    pub id: i64,
    pub date: NaiveDate,
    pub room_number: i64,
    pub gestionnaire_name: String,
    pub sale_type: SaleType,
    pub price: i64,
    pub status: SaleStatus,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReportRow {
    pub id: i64,
    pub date: NaiveDate,
    pub gestionnaire_name: String,
    pub reason: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: i64,
    pub total_expenses: i64,
    pub net_profit: i64,
    pub sales: Vec<SaleReportRow>,
    pub expenses: Vec<ExpenseReportRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn period_padrao_e_hoje() {
        let today = day("2026-08-06");
        assert_eq!(
            Period::from_query(None, None, None).resolve(today),
            (today, today)
        );
        assert_eq!(
            Period::from_query(Some("today"), None, None).resolve(today),
            (today, today)
        );
    }

    #[test]
    fn period_semana_e_mes_contam_para_tras() {
        let today = day("2026-08-06");
        assert_eq!(
            Period::from_query(Some("week"), None, None).resolve(today),
            (day("2026-07-30"), today)
        );
        assert_eq!(
            Period::from_query(Some("month"), None, None).resolve(today),
            (day("2026-07-07"), today)
        );
    }

    #[test]
    fn period_customizado_assume_hoje_nos_limites_ausentes() {
        let today = day("2026-08-06");
        let p = Period::from_query(Some("custom"), Some(day("2026-01-01")), None);
        assert_eq!(p.resolve(today), (day("2026-01-01"), today));

        let p = Period::from_query(Some("custom"), None, None);
        assert_eq!(p.resolve(today), (today, today));
    }

    #[test]
    fn escopo_por_papel() {
        let admin = ReportViewer {
            role: Role::Admin,
            user_id: 1,
        };
        let gest = ReportViewer {
            role: Role::Gestionnaire,
            user_id: 7,
        };
        assert_eq!(admin.scope(), None);
        assert_eq!(gest.scope(), Some(7));
    }
}
