//! Rule-based chatbot over the inventory
//!
//! Classifies a free-text question into one of four intents by substring
//! matching, runs the corresponding read-only lookup and formats a
//! human-readable answer. Confidence is a static per-branch policy value,
//! not a computed probability.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{employee::Employee, enums::EquipmentType, equipment::Equipment, location::Location},
    repository::Repository,
};

static FLOOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)(?:e|er|ème)?\s+étage").expect("valid floor regex"));
static ROOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"bureau\s+(\d+)").expect("valid room regex"));

/// Chatbot reply: formatted answer, optional structured payload, confidence
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatbotReply {
    pub answer: String,
    #[schema(value_type = Object, nullable)]
    pub data: Option<serde_json::Value>,
    pub confidence: f64,
}

/// Classified purpose of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    LocationOfPerson,
    AvailabilityByType,
    EquipmentAtLocation,
    AssignmentLookup,
    Unknown,
}

/// Ordered, first-match-wins classification over the lowercased question
pub fn classify_intent(question: &str) -> Intent {
    if question.contains("où se trouve") || question.contains("où est") {
        Intent::LocationOfPerson
    } else if question.contains("disponible") || question.contains("en stock") {
        Intent::AvailabilityByType
    } else if question.contains("quel matériel")
        && (question.contains("étage") || question.contains("bureau"))
    {
        Intent::EquipmentAtLocation
    } else if question.contains("qui a") || question.contains("qui possède") {
        Intent::AssignmentLookup
    } else {
        Intent::Unknown
    }
}

/// Infer an equipment type from keyword membership, first match wins
fn infer_equipment_type(question: &str) -> Option<EquipmentType> {
    if question.contains("laptop") || question.contains("portable") {
        Some(EquipmentType::Laptop)
    } else if question.contains("pc") {
        Some(EquipmentType::Pc)
    } else if question.contains("écran")
        || question.contains("moniteur")
        || question.contains("monitor")
    {
        Some(EquipmentType::Monitor)
    } else if question.contains("téléphone") || question.contains("phone") {
        Some(EquipmentType::Phone)
    } else {
        None
    }
}

fn extract_floor(question: &str) -> Option<String> {
    FLOOR_RE
        .captures(question)
        .map(|caps| caps[1].to_string())
}

fn extract_room(question: &str) -> Option<String> {
    ROOM_RE
        .captures(question)
        .map(|caps| caps[1].to_string())
}

/// "{site}, Étage {floor}, Bureau {room}[, {exact_position}]", or a fixed
/// marker when the equipment has no location link
fn format_location(location: Option<&Location>) -> String {
    match location {
        None => "Non localisé".to_string(),
        Some(loc) => {
            let mut s = format!("{}, Étage {}, Bureau {}", loc.site, loc.floor, loc.room);
            if let Some(ref exact) = loc.exact_position {
                s.push_str(", ");
                s.push_str(exact);
            }
            s
        }
    }
}

fn person_equipment_reply(employee: &Employee, items: &[(Equipment, String)]) -> ChatbotReply {
    if items.is_empty() {
        return ChatbotReply {
            answer: format!(
                "{} {} n'a actuellement aucun matériel assigné.",
                employee.first_name, employee.last_name
            ),
            data: Some(json!({ "employee": employee.id })),
            confidence: 1.0,
        };
    }

    let mut answer = format!(
        "{} {} possède {} équipement(s) :\n",
        employee.first_name,
        employee.last_name,
        items.len()
    );
    let mut details = Vec::with_capacity(items.len());
    for (eq, location_str) in items {
        answer.push_str(&format!(
            "- {} {} (SN: {}) : {}\n",
            eq.equipment_type, eq.model, eq.serial_number, location_str
        ));
        details.push(json!({
            "type": eq.equipment_type,
            "model": eq.model,
            "serial_number": eq.serial_number,
            "location": location_str,
        }));
    }

    ChatbotReply {
        answer: answer.trim().to_string(),
        data: Some(json!({ "employee_id": employee.id, "equipment": details })),
        confidence: 1.0,
    }
}

fn availability_reply(equipment_type: Option<EquipmentType>, items: &[Equipment]) -> ChatbotReply {
    if items.is_empty() {
        let type_str = equipment_type.map(|t| t.as_str()).unwrap_or("matériel");
        return ChatbotReply {
            answer: format!(
                "Il n'y a actuellement aucun {} disponible en stock.",
                type_str
            ),
            data: Some(json!({ "count": 0, "type": equipment_type })),
            confidence: 1.0,
        };
    }

    let type_str = equipment_type.map(|t| t.as_str()).unwrap_or("équipement");
    let mut answer = format!(
        "Oui, nous avons {} {}(s) disponible(s) en stock :\n",
        items.len(),
        type_str
    );
    let mut details = Vec::with_capacity(items.len());
    for eq in items {
        answer.push_str(&format!(
            "- {} (SN: {}), condition: {}\n",
            eq.model, eq.serial_number, eq.condition
        ));
        details.push(json!({
            "id": eq.id,
            "model": eq.model,
            "serial_number": eq.serial_number,
            "condition": eq.condition,
        }));
    }

    ChatbotReply {
        answer: answer.trim().to_string(),
        data: Some(json!({ "count": items.len(), "equipment": details })),
        confidence: 1.0,
    }
}

fn at_location_reply(items: &[Equipment]) -> ChatbotReply {
    if items.is_empty() {
        return ChatbotReply {
            answer: "Aucun matériel trouvé à cet emplacement.".to_string(),
            data: None,
            confidence: 0.8,
        };
    }

    let mut answer = format!(
        "Matériel trouvé à cet emplacement ({} équipement(s)) :\n",
        items.len()
    );
    let mut details = Vec::with_capacity(items.len());
    for eq in items {
        answer.push_str(&format!(
            "- {} {} (SN: {})\n",
            eq.equipment_type, eq.model, eq.serial_number
        ));
        details.push(json!({
            "type": eq.equipment_type,
            "model": eq.model,
            "serial_number": eq.serial_number,
        }));
    }

    ChatbotReply {
        answer: answer.trim().to_string(),
        data: Some(json!({ "count": items.len(), "equipment": details })),
        confidence: 1.0,
    }
}

fn assignment_lookup_reply() -> ChatbotReply {
    ChatbotReply {
        answer: "Fonctionnalité en cours de développement. Veuillez fournir le numéro \
                 de série pour une recherche précise."
            .to_string(),
        data: None,
        confidence: 0.5,
    }
}

fn fallback_reply() -> ChatbotReply {
    ChatbotReply {
        answer: "Je n'ai pas compris votre question. Essayez de demander : \
                 'Où se trouve le PC de Jean Dupont ?' ou 'Avons-nous des laptops disponibles ?'"
            .to_string(),
        data: None,
        confidence: 0.0,
    }
}

#[derive(Clone)]
pub struct ChatbotService {
    repository: Repository,
}

impl ChatbotService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Process a natural language question about the inventory.
    /// All branches are read-only.
    pub async fn process_query(&self, question: &str) -> AppResult<ChatbotReply> {
        let question = question.to_lowercase();

        match classify_intent(&question) {
            Intent::LocationOfPerson => self.location_of_person(&question).await,
            Intent::AvailabilityByType => self.availability_by_type(&question).await,
            Intent::EquipmentAtLocation => self.equipment_at_location(&question).await,
            Intent::AssignmentLookup => Ok(assignment_lookup_reply()),
            Intent::Unknown => Ok(fallback_reply()),
        }
    }

    /// Where is the equipment of a given person. Employees are scanned in
    /// ascending-id order; a shared last name resolves to the lowest id.
    async fn location_of_person(&self, question: &str) -> AppResult<ChatbotReply> {
        let employees = self.repository.employees.list_all().await?;
        let employee = employees.into_iter().find(|e| {
            let full_name = format!("{} {}", e.first_name, e.last_name).to_lowercase();
            question.contains(&full_name) || question.contains(&e.last_name.to_lowercase())
        });

        let Some(employee) = employee else {
            return Ok(ChatbotReply {
                answer: "Je n'ai pas trouvé l'employé mentionné dans la base de données."
                    .to_string(),
                data: None,
                confidence: 0.5,
            });
        };

        let equipment = self.repository.equipment.list_by_employee(employee.id).await?;

        let mut items = Vec::with_capacity(equipment.len());
        for eq in equipment {
            let location = match eq.location_id {
                Some(location_id) => self.repository.locations.get_optional(location_id).await?,
                None => None,
            };
            let location_str = format_location(location.as_ref());
            items.push((eq, location_str));
        }

        Ok(person_equipment_reply(&employee, &items))
    }

    /// Do we have equipment of some type in stock
    async fn availability_by_type(&self, question: &str) -> AppResult<ChatbotReply> {
        let equipment_type = infer_equipment_type(question);
        let items = self.repository.equipment.list_available(equipment_type).await?;
        Ok(availability_reply(equipment_type, &items))
    }

    /// What equipment sits at a given floor/room
    async fn equipment_at_location(&self, question: &str) -> AppResult<ChatbotReply> {
        let floor = extract_floor(question);
        let room = extract_room(question);
        let items = self
            .repository
            .equipment
            .list_at_location(floor.as_deref(), room.as_deref())
            .await?;
        Ok(at_location_reply(&items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{EquipmentCondition, EquipmentStatus};
    use chrono::Utc;

    fn equipment(id: i32, ty: EquipmentType, model: &str, serial: &str) -> Equipment {
        Equipment {
            id,
            serial_number: serial.to_string(),
            model: model.to_string(),
            equipment_type: ty,
            condition: EquipmentCondition::New,
            status: EquipmentStatus::InStock,
            location_id: None,
            employee_id: None,
            assigned_user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn intents_dispatch_in_priority_order() {
        assert_eq!(
            classify_intent("où se trouve le laptop de jean dupont ?"),
            Intent::LocationOfPerson
        );
        assert_eq!(classify_intent("où est le pc de martin ?"), Intent::LocationOfPerson);
        assert_eq!(
            classify_intent("avons-nous des laptops disponibles ?"),
            Intent::AvailabilityByType
        );
        assert_eq!(classify_intent("reste-t-il des écrans en stock ?"), Intent::AvailabilityByType);
        assert_eq!(
            classify_intent("quel matériel est au 2ème étage ?"),
            Intent::EquipmentAtLocation
        );
        assert_eq!(
            classify_intent("quel matériel est dans le bureau 201 ?"),
            Intent::EquipmentAtLocation
        );
        // "quel matériel" without a floor/room keyword falls through
        assert_eq!(classify_intent("quel matériel avons-nous ?"), Intent::Unknown);
        assert_eq!(classify_intent("qui a le macbook pro ?"), Intent::AssignmentLookup);
        assert_eq!(classify_intent("qui possède le dell xps ?"), Intent::AssignmentLookup);
        assert_eq!(classify_intent("bonjour"), Intent::Unknown);
    }

    #[test]
    fn location_intent_wins_over_availability() {
        // Contains both "où se trouve" and "disponible"; first match wins.
        assert_eq!(
            classify_intent("où se trouve le dernier laptop disponible ?"),
            Intent::LocationOfPerson
        );
    }

    #[test]
    fn type_inference_keyword_priority() {
        assert_eq!(infer_equipment_type("un laptop"), Some(EquipmentType::Laptop));
        assert_eq!(infer_equipment_type("un pc portable"), Some(EquipmentType::Laptop));
        assert_eq!(infer_equipment_type("un pc fixe"), Some(EquipmentType::Pc));
        assert_eq!(infer_equipment_type("un écran"), Some(EquipmentType::Monitor));
        assert_eq!(infer_equipment_type("un moniteur"), Some(EquipmentType::Monitor));
        assert_eq!(infer_equipment_type("un téléphone"), Some(EquipmentType::Phone));
        assert_eq!(infer_equipment_type("du matériel"), None);
    }

    #[test]
    fn floor_and_room_extraction() {
        assert_eq!(extract_floor("quel matériel est au 2ème étage ?"), Some("2".to_string()));
        assert_eq!(extract_floor("au 3e étage"), Some("3".to_string()));
        assert_eq!(extract_floor("au 1er étage"), Some("1".to_string()));
        assert_eq!(extract_floor("au 12 étage"), Some("12".to_string()));
        assert_eq!(extract_floor("dans le bureau 201"), None);

        assert_eq!(extract_room("dans le bureau 201"), Some("201".to_string()));
        assert_eq!(extract_room("au 2ème étage"), None);
    }

    #[test]
    fn location_formatting() {
        let loc = Location {
            id: 1,
            site: "HQ".to_string(),
            floor: "2".to_string(),
            room: "201".to_string(),
            exact_position: None,
        };
        assert_eq!(format_location(Some(&loc)), "HQ, Étage 2, Bureau 201");

        let loc = Location {
            exact_position: Some("Armoire A, Poste 12".to_string()),
            ..loc
        };
        assert_eq!(
            format_location(Some(&loc)),
            "HQ, Étage 2, Bureau 201, Armoire A, Poste 12"
        );

        assert_eq!(format_location(None), "Non localisé");
    }

    #[test]
    fn person_reply_lists_each_item_with_location() {
        let employee = Employee {
            id: 7,
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            email: "jean.dupont@example.com".to_string(),
            department: "IT".to_string(),
        };
        let items = vec![(
            equipment(1, EquipmentType::Laptop, "X1", "SN1"),
            "HQ, Étage 2, Bureau 201".to_string(),
        )];

        let reply = person_equipment_reply(&employee, &items);
        assert_eq!(reply.confidence, 1.0);
        assert!(reply.answer.contains("SN1"));
        assert!(reply.answer.contains("HQ"));
        let data = reply.data.unwrap();
        assert_eq!(data["employee_id"], 7);
        assert_eq!(data["equipment"][0]["serial_number"], "SN1");
    }

    #[test]
    fn person_reply_without_equipment() {
        let employee = Employee {
            id: 3,
            first_name: "Marie".to_string(),
            last_name: "Curie".to_string(),
            email: "marie.curie@example.com".to_string(),
            department: "R&D".to_string(),
        };
        let reply = person_equipment_reply(&employee, &[]);
        assert_eq!(reply.confidence, 1.0);
        assert!(reply.answer.contains("aucun matériel assigné"));
        assert_eq!(reply.data.unwrap()["employee"], 3);
    }

    #[test]
    fn availability_reply_empty_count_is_zero() {
        let reply = availability_reply(Some(EquipmentType::Monitor), &[]);
        assert_eq!(reply.confidence, 1.0);
        assert!(reply.answer.contains("aucun monitor"));
        let data = reply.data.unwrap();
        assert_eq!(data["count"], 0);
        assert_eq!(data["type"], "monitor");
    }

    #[test]
    fn availability_reply_lists_condition() {
        let items = vec![equipment(4, EquipmentType::Laptop, "X1", "SN1")];
        let reply = availability_reply(Some(EquipmentType::Laptop), &items);
        assert_eq!(reply.confidence, 1.0);
        assert!(reply.answer.contains("1 laptop(s)"));
        assert!(reply.answer.contains("condition: new"));
        assert_eq!(reply.data.unwrap()["count"], 1);
    }

    #[test]
    fn at_location_reply_confidences() {
        assert_eq!(at_location_reply(&[]).confidence, 0.8);
        let items = vec![equipment(9, EquipmentType::Pc, "OptiPlex", "SN9")];
        let reply = at_location_reply(&items);
        assert_eq!(reply.confidence, 1.0);
        assert!(reply.answer.contains("SN9"));
    }

    #[test]
    fn stub_and_fallback_confidences() {
        assert_eq!(assignment_lookup_reply().confidence, 0.5);
        let fallback = fallback_reply();
        assert_eq!(fallback.confidence, 0.0);
        assert!(fallback.data.is_none());
    }
}
