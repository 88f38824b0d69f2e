//! Relatórios: dashboard, relatório unificado e exportação de checklist
//!
//! Os agregados são calculados em memória sobre os snapshots das coleções;
//! as funções de montagem são puras e os handlers só buscam os dados.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::report_dto::{
    ChecklistIssues, DashboardAlert, DashboardSummary, FlaggedItem, VehicleIssueGroup,
};
use crate::models::catalog::{self, is_issue_status};
use crate::models::checklist::{Checklist, VehicleClass};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::checklist_repository::ChecklistRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

/// Abaixo deste nível o veículo conta como "pouco combustível"
const LOW_FUEL_THRESHOLD: i32 = 25;

/// Quantos alertas recentes o dashboard exibe
const RECENT_ALERTS: usize = 5;

/// Itens reprovados de um checklist, na ordem do catálogo
fn flagged_items(checklist: &Checklist) -> Vec<FlaggedItem> {
    let Some(class) = VehicleClass::parse(&checklist.vehicle_class) else {
        return Vec::new();
    };

    let mut flagged = Vec::new();
    for section in catalog::catalog_for(class) {
        for item in section.items {
            if let Some(status) = checklist.items.get(item.id) {
                if is_issue_status(status) {
                    flagged.push(FlaggedItem {
                        item_id: item.id.to_string(),
                        item_name: item.label.to_string(),
                        status: status.clone(),
                    });
                }
            }
        }
    }
    flagged
}

/// Montar o resumo do dashboard a partir dos snapshots.
///
/// `checklists` deve vir ordenado do mais recente para o mais antigo
/// (ordem de listagem do repositório).
pub fn build_dashboard(vehicles: &[Vehicle], checklists: &[Checklist]) -> DashboardSummary {
    let vehicles_with_problems = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::HasProblems.as_str())
        .count() as i64;
    let vehicles_in_maintenance = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Maintenance.as_str())
        .count() as i64;
    let low_fuel_vehicles = vehicles
        .iter()
        .filter(|v| v.fuel_level < LOW_FUEL_THRESHOLD)
        .count() as i64;

    let vehicle_of = |id: Uuid| vehicles.iter().find(|v| v.id == id);

    let recent_alerts = checklists
        .iter()
        .filter_map(|c| {
            let flagged = flagged_items(c);
            if flagged.is_empty() {
                return None;
            }
            let (plate, model) = vehicle_of(c.vehicle_id)
                .map(|v| (v.plate.clone(), v.model.clone()))
                .unwrap_or_default();
            Some(DashboardAlert {
                checklist_id: c.id,
                vehicle_plate: plate,
                vehicle_model: model,
                driver_name: c.driver_name.clone(),
                date: c.date,
                problem_items: flagged.into_iter().map(|f| f.item_name).collect(),
            })
        })
        .take(RECENT_ALERTS)
        .collect();

    DashboardSummary {
        total_vehicles: vehicles.len() as i64,
        vehicles_with_problems,
        vehicles_in_maintenance,
        low_fuel_vehicles,
        recent_alerts,
    }
}

/// Agrupar checklists problemáticos por veículo, ordenado por placa.
/// Veículos sem nenhum problema registrado ficam de fora.
pub fn group_issues_by_vehicle(
    vehicles: &[Vehicle],
    checklists: &[Checklist],
) -> Vec<VehicleIssueGroup> {
    let mut ordered: Vec<&Vehicle> = vehicles.iter().collect();
    ordered.sort_by(|a, b| a.plate.cmp(&b.plate));

    ordered
        .into_iter()
        .filter_map(|vehicle| {
            let issues: Vec<ChecklistIssues> = checklists
                .iter()
                .filter(|c| c.vehicle_id == vehicle.id)
                .filter_map(|c| {
                    let flagged = flagged_items(c);
                    if flagged.is_empty() {
                        return None;
                    }
                    Some(ChecklistIssues {
                        checklist_id: c.id,
                        checklist_type: c.checklist_type.clone(),
                        driver_name: c.driver_name.clone(),
                        date: c.date,
                        flagged_items: flagged,
                    })
                })
                .collect();

            if issues.is_empty() {
                return None;
            }
            Some(VehicleIssueGroup {
                vehicle_id: vehicle.id,
                plate: vehicle.plate.clone(),
                model: vehicle.model.clone(),
                status: vehicle.status.clone(),
                checklists: issues,
            })
        })
        .collect()
}

pub async fn dashboard(pool: &PgPool) -> AppResult<DashboardSummary> {
    let vehicles = VehicleRepository::new(pool.clone()).list_all().await?;
    let checklists = ChecklistRepository::new(pool.clone())
        .list(None, None, None)
        .await?;

    Ok(build_dashboard(&vehicles, &checklists))
}

pub async fn unified_report(
    pool: &PgPool,
    vehicle_class: Option<&str>,
) -> AppResult<Vec<VehicleIssueGroup>> {
    let vehicles = VehicleRepository::new(pool.clone()).list_all().await?;
    let checklists = ChecklistRepository::new(pool.clone())
        .list(None, vehicle_class, None)
        .await?;

    Ok(group_issues_by_vehicle(&vehicles, &checklists))
}

/// Nome do arquivo exportado: `checklist-{placa}-{id curto}` para a frota
/// pesada, `checklist-leve-...` para a leve
pub fn export_file_name(class: VehicleClass, plate: &str, id: Uuid) -> String {
    let short_id: String = id.to_string().chars().take(5).collect();
    match class {
        VehicleClass::Heavy => format!("checklist-{}-{}.pdf", plate, short_id),
        VehicleClass::Light => format!("checklist-leve-{}-{}.pdf", plate, short_id),
    }
}

fn checklist_class(checklist: &Checklist) -> AppResult<VehicleClass> {
    VehicleClass::parse(&checklist.vehicle_class).ok_or_else(|| {
        AppError::Internal(format!(
            "Classe de veículo desconhecida em checklist persistido: '{}'",
            checklist.vehicle_class
        ))
    })
}

/// Linhas do relatório, comuns ao texto e ao PDF
fn report_lines(checklist: &Checklist, vehicle: &Vehicle) -> AppResult<Vec<String>> {
    let class = checklist_class(checklist)?;

    let mut lines = Vec::new();
    lines.push("ROTA CERTA - Relatório de Checklist".to_string());
    lines.push(String::new());
    lines.push(format!("Veículo: {} ({})", vehicle.plate, vehicle.model));
    lines.push(format!("Motorista: {}", checklist.driver_name));
    lines.push(format!("Tipo: {}", checklist.checklist_type));
    lines.push(format!(
        "Data: {}",
        checklist.date.format("%d/%m/%Y %H:%M")
    ));
    lines.push(format!("Quilometragem: {} km", checklist.odometer));
    if let Some(fuel) = checklist.fuel_level {
        lines.push(format!("Combustível: {}%", fuel));
    }
    lines.push(String::new());

    for section in catalog::catalog_for(class) {
        lines.push(format!("== {} ==", section.name));
        for item in section.items {
            if let Some(status) = checklist.items.get(item.id) {
                let marker = if is_issue_status(status) { " [!]" } else { "" };
                lines.push(format!("  {}: {}{}", item.label, status, marker));
            }
        }
        lines.push(String::new());
    }

    let flagged = flagged_items(checklist);
    if flagged.is_empty() {
        lines.push("Nenhum problema reportado.".to_string());
    } else {
        lines.push(format!("Itens com problema ({}):", flagged.len()));
        for item in flagged {
            lines.push(format!("  - {} ({})", item.item_name, item.status));
        }
    }

    if let Some(notes) = checklist.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        lines.push(String::new());
        lines.push("Observações:".to_string());
        lines.push(format!("  {}", notes));
    }

    let photos: &[(&str, &Option<String>)] = &[
        ("Painel", &checklist.dashboard_photo_url),
        ("Frente", &checklist.front_photo_url),
        ("Traseira", &checklist.back_photo_url),
        ("Lateral esquerda", &checklist.left_side_photo_url),
        ("Lateral direita", &checklist.right_side_photo_url),
        ("Combustível", &checklist.fuel_level_photo_url),
        ("Quilometragem", &checklist.km_photo_url),
        ("Motor", &checklist.engine_photo_url),
        ("Porta-malas", &checklist.trunk_photo_url),
    ];
    let present: Vec<String> = photos
        .iter()
        .filter_map(|(label, url)| {
            url.as_deref()
                .filter(|u| !u.trim().is_empty())
                .map(|u| format!("  {}: {}", label, u))
        })
        .collect();
    if !present.is_empty() {
        lines.push(String::new());
        lines.push("Fotos:".to_string());
        lines.extend(present);
    }

    Ok(lines)
}

/// Relatório em texto puro
pub fn render_text(checklist: &Checklist, vehicle: &Vehicle) -> AppResult<String> {
    Ok(report_lines(checklist, vehicle)?.join("\n"))
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 6.0;

/// Relatório em PDF (A4, fontes builtin)
pub fn render_pdf(checklist: &Checklist, vehicle: &Vehicle) -> AppResult<Vec<u8>> {
    let lines = report_lines(checklist, vehicle)?;

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Relatório de Checklist",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "conteudo",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Internal(format!("Erro ao gerar PDF: {}", e)))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Internal(format!("Erro ao gerar PDF: {}", e)))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for (index, line) in lines.iter().enumerate() {
        if y < MARGIN_MM {
            let (page, new_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "conteudo");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }

        if !line.is_empty() {
            let heading = index == 0 || line.starts_with("== ");
            let (size, font_ref) = if heading {
                (13.0, &font_bold)
            } else {
                (10.0, &font)
            };
            layer.use_text(line.clone(), size, Mm(MARGIN_MM), Mm(y), font_ref);
        }
        y -= LINE_HEIGHT_MM;
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| AppError::Internal(format!("Erro ao gerar PDF: {}", e)))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;
    use std::collections::BTreeMap;

    fn vehicle(plate: &str, status: &str, fuel: i32) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: plate.to_string(),
            model: "Sprinter 416".to_string(),
            make: "Mercedes-Benz".to_string(),
            status: status.to_string(),
            fuel_level: fuel,
            odometer: 50_000,
            image_url: None,
            last_check: None,
            created_at: Utc::now(),
        }
    }

    fn heavy_checklist(vehicle_id: Uuid, issue_item: Option<&str>) -> Checklist {
        let mut items = BTreeMap::new();
        for section in catalog::catalog_for(VehicleClass::Heavy) {
            for item in section.items {
                items.insert(item.id.to_string(), "ok".to_string());
            }
        }
        if let Some(id) = issue_item {
            items.insert(id.to_string(), "issue".to_string());
        }

        Checklist {
            id: Uuid::new_v4(),
            vehicle_id,
            user_id: Uuid::new_v4(),
            driver_name: "Carlos Lima".to_string(),
            vehicle_class: "pesada".to_string(),
            checklist_type: "Saída".to_string(),
            date: Utc::now(),
            odometer: 50_100,
            fuel_level: Some(60),
            items: Json(items),
            notes: None,
            dashboard_photo_url: Some("https://fotos/p.jpg".to_string()),
            front_photo_url: Some("https://fotos/f.jpg".to_string()),
            back_photo_url: Some("https://fotos/t.jpg".to_string()),
            left_side_photo_url: Some("https://fotos/e.jpg".to_string()),
            right_side_photo_url: Some("https://fotos/d.jpg".to_string()),
            fuel_level_photo_url: None,
            km_photo_url: None,
            engine_photo_url: None,
            trunk_photo_url: None,
        }
    }

    #[test]
    fn dashboard_conta_status_e_combustivel_baixo() {
        let vehicles = vec![
            vehicle("AAA-1111", "Operacional", 80),
            vehicle("BBB-2222", "Com Problemas", 10),
            vehicle("CCC-3333", "Manutenção", 24),
        ];

        let summary = build_dashboard(&vehicles, &[]);

        assert_eq!(summary.total_vehicles, 3);
        assert_eq!(summary.vehicles_with_problems, 1);
        assert_eq!(summary.vehicles_in_maintenance, 1);
        assert_eq!(summary.low_fuel_vehicles, 2);
        assert!(summary.recent_alerts.is_empty());
    }

    #[test]
    fn dashboard_limita_alertas_aos_mais_recentes() {
        let v = vehicle("AAA-1111", "Com Problemas", 80);
        let checklists: Vec<Checklist> = (0..8)
            .map(|_| heavy_checklist(v.id, Some("farol_esquerdo")))
            .collect();

        let summary = build_dashboard(&[v], &checklists);

        assert_eq!(summary.recent_alerts.len(), 5);
        assert_eq!(summary.recent_alerts[0].problem_items, vec!["Farol Esquerdo"]);
        assert_eq!(summary.recent_alerts[0].vehicle_plate, "AAA-1111");
    }

    #[test]
    fn relatorio_unificado_agrupa_por_veiculo_e_ignora_limpos() {
        let com_problema = vehicle("BBB-2222", "Com Problemas", 50);
        let limpo = vehicle("AAA-1111", "Operacional", 90);

        let checklists = vec![
            heavy_checklist(com_problema.id, Some("buzina")),
            heavy_checklist(com_problema.id, None),
            heavy_checklist(limpo.id, None),
        ];

        let groups = group_issues_by_vehicle(&[com_problema, limpo], &checklists);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].plate, "BBB-2222");
        assert_eq!(groups[0].checklists.len(), 1);
        assert_eq!(groups[0].checklists[0].flagged_items[0].item_name, "Buzina");
    }

    #[test]
    fn agregacao_e_pura() {
        let v = vehicle("BBB-2222", "Com Problemas", 50);
        let checklists = vec![heavy_checklist(v.id, Some("buzina"))];
        let vehicles = vec![v];

        let first = serde_json::to_value(group_issues_by_vehicle(&vehicles, &checklists)).unwrap();
        let second = serde_json::to_value(group_issues_by_vehicle(&vehicles, &checklists)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nome_do_arquivo_depende_da_classe() {
        let id = Uuid::parse_str("a1b2c3d4-0000-0000-0000-000000000000").unwrap();
        assert_eq!(
            export_file_name(VehicleClass::Heavy, "ABC-1234", id),
            "checklist-ABC-1234-a1b2c.pdf"
        );
        assert_eq!(
            export_file_name(VehicleClass::Light, "DEF-5678", id),
            "checklist-leve-DEF-5678-a1b2c.pdf"
        );
    }

    #[test]
    fn texto_inclui_cabecalho_secoes_e_problemas() {
        let v = vehicle("ABC-1234", "Com Problemas", 60);
        let c = heavy_checklist(v.id, Some("extintor"));

        let text = render_text(&c, &v).unwrap();

        assert!(text.contains("ABC-1234"));
        assert!(text.contains("Carlos Lima"));
        assert!(text.contains("== Equipamentos de Segurança =="));
        assert!(text.contains("Extintor: issue [!]"));
        assert!(text.contains("Itens com problema (1):"));
    }

    #[test]
    fn texto_sem_problemas_diz_isso() {
        let v = vehicle("ABC-1234", "Operacional", 60);
        let c = heavy_checklist(v.id, None);

        let text = render_text(&c, &v).unwrap();
        assert!(text.contains("Nenhum problema reportado."));
    }

    #[test]
    fn pdf_comeca_com_assinatura_valida() {
        let v = vehicle("ABC-1234", "Operacional", 60);
        let c = heavy_checklist(v.id, Some("macaco"));

        let bytes = render_pdf(&c, &v).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }
}
