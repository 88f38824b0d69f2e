//! Catálogo estático dos itens de checklist
//!
//! Duas frotas, dois catálogos: a frota pesada usa o domínio de três valores
//! (`ok`/`issue`/`na`) em todas as seções; a frota leve usa o domínio de três
//! valores apenas nos pneus e um domínio de sete valores em todo o resto.
//! O domínio válido é uma propriedade do item (tag no catálogo), nunca um
//! enum global.
//!
//! Aqui também vive o predicado único de classificação de problema
//! ([`is_issue_status`]) usado pelo cálculo de status do veículo, pela
//! geração de solicitações de manutenção, pelo dashboard e pelos relatórios.

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;

use crate::models::checklist::VehicleClass;
use crate::utils::errors::AppError;

/// Domínio de status permitido para um item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDomain {
    /// `ok` / `issue` / `na`
    ThreeValue,
    /// `Excelente` / `Desgastado` / `Incompleto` / `Feito` / `Pendente` /
    /// `Avariado` / `Manchado`
    SevenValue,
}

pub const THREE_VALUE_STATUSES: &[&str] = &["ok", "issue", "na"];
pub const SEVEN_VALUE_STATUSES: &[&str] = &[
    "Excelente",
    "Desgastado",
    "Incompleto",
    "Feito",
    "Pendente",
    "Avariado",
    "Manchado",
];

impl StatusDomain {
    pub fn allowed_values(&self) -> &'static [&'static str] {
        match self {
            StatusDomain::ThreeValue => THREE_VALUE_STATUSES,
            StatusDomain::SevenValue => SEVEN_VALUE_STATUSES,
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values().contains(&value)
    }
}

/// Conjunto canônico de status que contam como problema.
///
/// Único ponto de verdade: dashboard, relatórios e geração de
/// solicitações usam todos este mesmo conjunto.
pub const ISSUE_STATUSES: &[&str] = &["issue", "Avariado", "Incompleto", "Desgastado"];

/// Predicado único de classificação de problema
pub fn is_issue_status(status: &str) -> bool {
    ISSUE_STATUSES.contains(&status)
}

/// `true` se ao menos um item do mapa reporta problema
pub fn has_issues(items: &BTreeMap<String, String>) -> bool {
    items.values().any(|status| is_issue_status(status))
}

/// Um item do catálogo
#[derive(Debug, Clone, Copy)]
pub struct CatalogItem {
    pub id: &'static str,
    pub label: &'static str,
    pub domain: StatusDomain,
}

/// Uma seção do catálogo
#[derive(Debug, Clone, Copy)]
pub struct CatalogSection {
    pub key: &'static str,
    pub name: &'static str,
    pub items: &'static [CatalogItem],
}

const fn three(id: &'static str, label: &'static str) -> CatalogItem {
    CatalogItem {
        id,
        label,
        domain: StatusDomain::ThreeValue,
    }
}

const fn seven(id: &'static str, label: &'static str) -> CatalogItem {
    CatalogItem {
        id,
        label,
        domain: StatusDomain::SevenValue,
    }
}

/// Catálogo da frota pesada: 8 seções, domínio de três valores
pub static HEAVY_SECTIONS: &[CatalogSection] = &[
    CatalogSection {
        key: "iluminacao",
        name: "Iluminação",
        items: &[
            three("farol_esquerdo", "Farol Esquerdo"),
            three("farol_direito", "Farol Direito"),
            three("pisca_esquerdo", "Pisca Esquerdo"),
            three("pisca_direito", "Pisca Direito"),
            three("lanterna_esquerda", "Lanterna Esquerda"),
            three("lanterna_direita", "Lanterna Direita"),
            three("luz_de_freio", "Luz de Freio"),
            three("luz_de_placa", "Luz de Placa"),
        ],
    },
    CatalogSection {
        key: "sinais",
        name: "Sinais e Climatização",
        items: &[
            three("buzina", "Buzina"),
            three("ar_condicionado", "Ar Condicionado"),
        ],
    },
    CatalogSection {
        key: "espelhos",
        name: "Espelhos e Vidros",
        items: &[
            three("retrovisor_interno", "Retrovisor Interno"),
            three("retrovisor_esquerdo", "Retrovisor Esquerdo"),
            three("retrovisor_direito", "Retrovisor Direito"),
            three("limpador_parabrisa", "Limpador Para-brisa"),
            three("vidros_laterais", "Vidros Laterais"),
            three("parabrisa_dianteiro", "Para-brisa Dianteiro"),
            three("vidros_eletricos", "Vidros Elétricos"),
        ],
    },
    CatalogSection {
        key: "fluidos",
        name: "Níveis de Fluídos",
        items: &[
            three("nivel_oleo_motor", "Nível de Óleo do Motor"),
            three("nivel_oleo_hidraulico", "Nível de Óleo Hidráulico"),
            three("nivel_agua_parabrisa", "Nível Água Parabrisa"),
            three("nivel_fluido_freio", "Nível Fluido de Freio"),
            three("nivel_liquido_arrefecimento", "Nível Líquido de Arrefecimento"),
        ],
    },
    CatalogSection {
        key: "interior",
        name: "Interior do Veículo",
        items: &[
            three("radio", "Rádio"),
            three("estofamento_bancos", "Estofamento dos Bancos"),
            three("tapetes_internos", "Tapetes Internos"),
            three("forro_interno", "Forro Interno"),
            three("cintos_seguranca", "Cintos de Segurança"),
        ],
    },
    CatalogSection {
        key: "seguranca",
        name: "Equipamentos de Segurança",
        items: &[
            three("macaco", "Macaco"),
            three("chave_de_roda", "Chave de Roda"),
            three("estepe", "Estepe"),
            three("triangulo", "Triângulo"),
            three("extintor", "Extintor"),
        ],
    },
    CatalogSection {
        key: "diversos",
        name: "Itens Diversos",
        items: &[
            three("bateria", "Bateria"),
            three("indicadores_painel", "Indicadores do Painel"),
            three("documento_veicular", "Documento Veicular"),
            three("manual_do_carro", "Manual do Carro"),
            three("maquina_cartao", "Máquina de Cartão"),
            three("cartao_abastecimento", "Cartão de Abastecimento"),
            three("carrinho_carga", "Carrinho de Carga"),
            three("chave_ignicao", "Chave de Ignição"),
        ],
    },
    CatalogSection {
        key: "limpeza",
        name: "Limpeza",
        items: &[
            three("limpeza_interior", "Limpeza Interior"),
            three("limpeza_exterior", "Limpeza Exterior"),
        ],
    },
];

/// Catálogo da frota leve: pneus em três valores, o resto em sete
pub static LIGHT_SECTIONS: &[CatalogSection] = &[
    CatalogSection {
        key: "pneus",
        name: "Pneus",
        items: &[
            three("pneu_dianteiro_esquerdo", "Pneu Dianteiro Esquerdo"),
            three("pneu_dianteiro_direito", "Pneu Dianteiro Direito"),
            three("pneu_traseiro_esquerdo", "Pneu Traseiro Esquerdo"),
            three("pneu_traseiro_direito", "Pneu Traseiro Direito"),
            three("pneu_estepe", "Pneu Estepe"),
        ],
    },
    CatalogSection {
        key: "interior_leve",
        name: "Interior",
        items: &[
            seven("bancos", "Bancos"),
            seven("tapetes", "Tapetes"),
            seven("painel_instrumentos", "Painel de Instrumentos"),
            seven("cinto_seguranca", "Cinto de Segurança"),
            seven("limpeza_interna", "Limpeza Interna"),
        ],
    },
    CatalogSection {
        key: "exterior_leve",
        name: "Exterior",
        items: &[
            seven("lataria", "Lataria"),
            seven("pintura", "Pintura"),
            seven("parachoque_dianteiro", "Para-choque Dianteiro"),
            seven("parachoque_traseiro", "Para-choque Traseiro"),
            seven("retrovisores_externos", "Retrovisores Externos"),
            seven("farois", "Faróis"),
            seven("lanternas", "Lanternas"),
        ],
    },
    CatalogSection {
        key: "motor",
        name: "Motor",
        items: &[
            seven("nivel_oleo", "Nível de Óleo"),
            seven("nivel_agua_radiador", "Nível de Água do Radiador"),
            seven("fluido_freio", "Fluido de Freio"),
            seven("bateria_veiculo", "Bateria"),
            seven("correias", "Correias"),
            seven("mangueiras", "Mangueiras"),
        ],
    },
    CatalogSection {
        key: "porta_malas",
        name: "Porta-malas",
        items: &[
            seven("macaco_hidraulico", "Macaco Hidráulico"),
            seven("chave_roda", "Chave de Roda"),
            seven("triangulo_sinalizacao", "Triângulo de Sinalização"),
            seven("extintor_incendio", "Extintor de Incêndio"),
            seven("organizacao_porta_malas", "Organização do Porta-malas"),
        ],
    },
];

/// Catálogo aplicável a uma classe de veículo
pub fn catalog_for(class: VehicleClass) -> &'static [CatalogSection] {
    match class {
        VehicleClass::Heavy => HEAVY_SECTIONS,
        VehicleClass::Light => LIGHT_SECTIONS,
    }
}

lazy_static! {
    /// Índice id → item sobre os dois catálogos (ids são únicos entre frotas)
    static ref ITEM_INDEX: HashMap<&'static str, &'static CatalogItem> = {
        let mut index = HashMap::new();
        for section in HEAVY_SECTIONS.iter().chain(LIGHT_SECTIONS.iter()) {
            for item in section.items {
                index.insert(item.id, item);
            }
        }
        index
    };
}

/// Buscar um item por id em qualquer um dos catálogos
pub fn find_item(id: &str) -> Option<&'static CatalogItem> {
    ITEM_INDEX.get(id).copied()
}

/// Label legível de um item; cai no próprio id se desconhecido
pub fn item_label(id: &str) -> &str {
    find_item(id).map(|item| item.label).unwrap_or(id)
}

/// Validar o mapa de itens submetido contra o catálogo da classe.
///
/// Todo item do catálogo deve estar presente com um valor permitido pelo
/// domínio do próprio item; ids fora do catálogo são rejeitados.
pub fn validate_items(
    class: VehicleClass,
    items: &BTreeMap<String, String>,
) -> Result<(), AppError> {
    let sections = catalog_for(class);

    for section in sections {
        for item in section.items {
            match items.get(item.id) {
                None => {
                    return Err(AppError::BadRequest(format!(
                        "Item '{}' ausente no checklist",
                        item.id
                    )));
                }
                Some(value) if !item.domain.allows(value) => {
                    return Err(AppError::BadRequest(format!(
                        "Status '{}' não é válido para o item '{}'",
                        value, item.id
                    )));
                }
                Some(_) => {}
            }
        }
    }

    let known: HashMap<&str, ()> = sections
        .iter()
        .flat_map(|s| s.items.iter().map(|i| (i.id, ())))
        .collect();
    for id in items.keys() {
        if !known.contains_key(id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Item '{}' não pertence ao checklist desta frota",
                id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_items(class: VehicleClass, value_for: impl Fn(&CatalogItem) -> &'static str) -> BTreeMap<String, String> {
        let mut items = BTreeMap::new();
        for section in catalog_for(class) {
            for item in section.items {
                items.insert(item.id.to_string(), value_for(item).to_string());
            }
        }
        items
    }

    fn good_value(item: &CatalogItem) -> &'static str {
        match item.domain {
            StatusDomain::ThreeValue => "ok",
            StatusDomain::SevenValue => "Excelente",
        }
    }

    #[test]
    fn predicado_de_problema_cobre_o_conjunto_canonico() {
        for status in ["issue", "Avariado", "Incompleto", "Desgastado"] {
            assert!(is_issue_status(status), "{} deveria contar como problema", status);
        }
        for status in ["ok", "na", "Excelente", "Feito", "Pendente", "Manchado"] {
            assert!(!is_issue_status(status), "{} não deveria contar como problema", status);
        }
    }

    #[test]
    fn has_issues_reflete_qualquer_item_problematico() {
        let mut items = full_items(VehicleClass::Heavy, good_value);
        assert!(!has_issues(&items));

        items.insert("farol_esquerdo".to_string(), "issue".to_string());
        assert!(has_issues(&items));
    }

    #[test]
    fn dominio_e_propriedade_do_item() {
        // Pneu (frota leve) aceita o domínio de três valores
        let pneu = find_item("pneu_dianteiro_esquerdo").unwrap();
        assert_eq!(pneu.domain, StatusDomain::ThreeValue);
        assert!(pneu.domain.allows("issue"));
        assert!(!pneu.domain.allows("Avariado"));

        // Lataria (frota leve) aceita o domínio de sete valores
        let lataria = find_item("lataria").unwrap();
        assert_eq!(lataria.domain, StatusDomain::SevenValue);
        assert!(lataria.domain.allows("Avariado"));
        assert!(!lataria.domain.allows("issue"));
    }

    #[test]
    fn validate_items_aceita_checklist_completo() {
        let items = full_items(VehicleClass::Heavy, good_value);
        assert!(validate_items(VehicleClass::Heavy, &items).is_ok());

        let items = full_items(VehicleClass::Light, good_value);
        assert!(validate_items(VehicleClass::Light, &items).is_ok());
    }

    #[test]
    fn validate_items_rejeita_item_ausente() {
        let mut items = full_items(VehicleClass::Heavy, good_value);
        items.remove("buzina");
        assert!(validate_items(VehicleClass::Heavy, &items).is_err());
    }

    #[test]
    fn validate_items_rejeita_valor_fora_do_dominio() {
        let mut items = full_items(VehicleClass::Heavy, good_value);
        items.insert("buzina".to_string(), "Avariado".to_string());
        assert!(validate_items(VehicleClass::Heavy, &items).is_err());
    }

    #[test]
    fn validate_items_rejeita_id_desconhecido() {
        let mut items = full_items(VehicleClass::Light, good_value);
        items.insert("item_inventado".to_string(), "ok".to_string());
        assert!(validate_items(VehicleClass::Light, &items).is_err());
    }

    #[test]
    fn label_resolve_pelo_catalogo() {
        assert_eq!(item_label("farol_esquerdo"), "Farol Esquerdo");
        assert_eq!(item_label("id_inexistente"), "id_inexistente");
    }
}
