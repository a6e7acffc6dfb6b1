// src/services/export_service.rs

use genpdf::{elements, style, Element};

use crate::{common::error::AppError, models::report::ReportView};

// Renderiza o mesmo ReportView em CSV e PDF. Nenhuma agregação acontece
// aqui: os totais chegam prontos do FinanceService.
#[derive(Clone)]
pub struct ExportService {
    font_dir: String,
}

// Valores monetários com agrupamento de milhares, ex: "50 000 BIF".
fn format_bif(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{} BIF", grouped)
    } else {
        format!("{} BIF", grouped)
    }
}

impl ExportService {
    pub fn new(font_dir: String) -> Self {
        Self { font_dir }
    }

    // --- CSV ---
    // Bloco de resumo, linha em branco, tabela de vendas, linha em branco,
    // tabela de despesas. As colunas seguem a ordem dos relatórios em tela.
    pub fn render_csv(&self, report: &ReportView) -> Result<Vec<u8>, AppError> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        wtr.write_record(["Rapport financier"])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        wtr.write_record([
            "Période".to_string(),
            format!("{} - {}", report.start_date, report.end_date),
        ])
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        wtr.write_record(["Revenu total".to_string(), format_bif(report.total_income)])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        wtr.write_record([
            "Dépenses totales".to_string(),
            format_bif(report.total_expenses),
        ])
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        wtr.write_record(["Bénéfice net".to_string(), format_bif(report.net_profit)])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        wtr.write_record([""])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        wtr.write_record(["Date", "Chambre", "Gestionnaire", "Type", "Prix", "Statut"])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        for sale in &report.sales {
            wtr.write_record([
                sale.date.to_string(),
                sale.room_number.to_string(),
                sale.gestionnaire_name.clone(),
                sale.sale_type.as_str().to_string(),
                format_bif(sale.price),
                sale.status.as_str().to_string(),
            ])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        wtr.write_record([""])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        wtr.write_record(["Date", "Gestionnaire", "Motif", "Montant"])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        for expense in &report.expenses {
            wtr.write_record([
                expense.date.to_string(),
                expense.gestionnaire_name.clone(),
                expense.reason.clone(),
                format_bif(expense.amount),
            ])
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        wtr.into_inner()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))
    }

    // --- PDF ---
    pub fn render_pdf(&self, report: &ReportView) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta de fontes (Roboto, como nos demais documentos)
        let font_family = genpdf::fonts::from_files(&self.font_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!("Fonte não encontrada na pasta {}", self.font_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title("Rapport financier");
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new("RAPPORT FINANCIER")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Période: {} - {}",
            report.start_date.format("%d/%m/%Y"),
            report.end_date.format("%d/%m/%Y")
        )));

        doc.push(elements::Break::new(1.5));

        // --- RESUMO ---
        doc.push(elements::Paragraph::new(format!(
            "Revenu total: {}",
            format_bif(report.total_income)
        )));
        doc.push(elements::Paragraph::new(format!(
            "Dépenses totales: {}",
            format_bif(report.total_expenses)
        )));
        doc.push(
            elements::Paragraph::new(format!("Bénéfice net: {}", format_bif(report.net_profit)))
                .styled(style::Style::new().bold().with_font_size(12)),
        );

        doc.push(elements::Break::new(2));

        let style_bold = style::Style::new().bold();

        // --- TABELA DE VENDAS ---
        doc.push(
            elements::Paragraph::new("Ventes")
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        let mut sales_table = elements::TableLayout::new(vec![2, 2, 3, 2, 3, 2]);
        sales_table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        sales_table
            .row()
            .element(elements::Paragraph::new("Date").styled(style_bold))
            .element(elements::Paragraph::new("Chambre").styled(style_bold))
            .element(elements::Paragraph::new("Gestionnaire").styled(style_bold))
            .element(elements::Paragraph::new("Type").styled(style_bold))
            .element(elements::Paragraph::new("Prix").styled(style_bold))
            .element(elements::Paragraph::new("Statut").styled(style_bold))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        for sale in &report.sales {
            sales_table
                .row()
                .element(elements::Paragraph::new(
                    sale.date.format("%d/%m/%Y").to_string(),
                ))
                .element(elements::Paragraph::new(sale.room_number.to_string()))
                .element(elements::Paragraph::new(sale.gestionnaire_name.clone()))
                .element(elements::Paragraph::new(sale.sale_type.as_str()))
                .element(elements::Paragraph::new(format_bif(sale.price)))
                .element(elements::Paragraph::new(sale.status.as_str()))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        doc.push(sales_table);
        doc.push(elements::Break::new(2));

        // --- TABELA DE DESPESAS ---
        doc.push(
            elements::Paragraph::new("Dépenses")
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        let mut expenses_table = elements::TableLayout::new(vec![2, 3, 4, 2]);
        expenses_table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        expenses_table
            .row()
            .element(elements::Paragraph::new("Date").styled(style_bold))
            .element(elements::Paragraph::new("Gestionnaire").styled(style_bold))
            .element(elements::Paragraph::new("Motif").styled(style_bold))
            .element(elements::Paragraph::new("Montant").styled(style_bold))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        for expense in &report.expenses {
            expenses_table
                .row()
                .element(elements::Paragraph::new(
                    expense.date.format("%d/%m/%Y").to_string(),
                ))
                .element(elements::Paragraph::new(expense.gestionnaire_name.clone()))
                .element(elements::Paragraph::new(expense.reason.clone()))
                .element(elements::Paragraph::new(format_bif(expense.amount)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        doc.push(expenses_table);

        // Renderiza para um buffer em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        report::{ExpenseReportRow, SaleReportRow},
        sale::{SaleStatus, SaleType},
    };
    use chrono::NaiveDate;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_report() -> ReportView {
        ReportView {
            start_date: day("2026-08-01"),
            end_date: day("2026-08-06"),
            total_income: 80_000,
            total_expenses: 12_500,
            net_profit: 67_500,
            sales: vec![SaleReportRow {
                id: 1,
                date: day("2026-08-05"),
                room_number: 3,
                gestionnaire_name: "gestionnaire".to_string(),
                sale_type: SaleType::Full,
                price: 50_000,
                status: SaleStatus::Active,
            }],
            expenses: vec![ExpenseReportRow {
                id: 1,
                date: day("2026-08-04"),
                gestionnaire_name: "gestionnaire".to_string(),
                reason: "Savon".to_string(),
                amount: 12_500,
            }],
        }
    }

    #[test]
    fn format_bif_agrupa_milhares() {
        assert_eq!(format_bif(0), "0 BIF");
        assert_eq!(format_bif(500), "500 BIF");
        assert_eq!(format_bif(50_000), "50 000 BIF");
        assert_eq!(format_bif(1_234_567), "1 234 567 BIF");
        assert_eq!(format_bif(-7_500), "-7 500 BIF");
    }

    #[test]
    fn csv_carrega_resumo_e_as_duas_tabelas() {
        let service = ExportService::new("./fonts".to_string());
        let bytes = service.render_csv(&sample_report()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("Revenu total,80 000 BIF"));
        assert!(text.contains("Bénéfice net,67 500 BIF"));
        assert!(text.contains("Date,Chambre,Gestionnaire,Type,Prix,Statut"));
        assert!(text.contains("2026-08-05,3,gestionnaire,full,50 000 BIF,active"));
        assert!(text.contains("Date,Gestionnaire,Motif,Montant"));
        assert!(text.contains("2026-08-04,gestionnaire,Savon,12 500 BIF"));
    }
}
