use serde::{Deserialize, Serialize};

/// One itemised finding of the paid dossier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierError {
    pub error: String,
    pub why_bad: String,
    pub how_to_fix: String,
}

/// Output of the `dossie` mode. An empty `errors` list is a valid result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DossierPayload {
    pub errors: Vec<DossierError>,
}

/// What a dossier screen should show.
#[derive(Debug, Clone, PartialEq)]
pub enum DossierView<'a> {
    /// Nothing to fix. Rendered as "no errors found", not as loading or failure.
    Clean,
    Findings(&'a [DossierError]),
}

impl DossierPayload {
    pub fn view(&self) -> DossierView<'_> {
        if self.errors.is_empty() {
            DossierView::Clean
        } else {
            DossierView::Findings(&self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_is_clean_view() {
        let payload: DossierPayload = serde_json::from_str(r#"{"errors": []}"#).unwrap();
        assert_eq!(payload.view(), DossierView::Clean);
    }

    #[test]
    fn test_findings_view_keeps_order() {
        let payload: DossierPayload = serde_json::from_str(
            r#"{"errors": [
                {"error": "Sem métricas", "whyBad": "Vago", "howToFix": "Adicione números"},
                {"error": "Foto no CV", "whyBad": "Desnecessário", "howToFix": "Remova"}
            ]}"#,
        )
        .unwrap();
        match payload.view() {
            DossierView::Findings(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].error, "Sem métricas");
                assert_eq!(items[1].how_to_fix, "Remova");
            }
            DossierView::Clean => panic!("expected findings"),
        }
    }

    #[test]
    fn test_missing_errors_key_is_rejected() {
        assert!(serde_json::from_str::<DossierPayload>("{}").is_err());
    }

    #[test]
    fn test_item_missing_field_is_rejected() {
        let json = r#"{"errors": [{"error": "x", "whyBad": "y"}]}"#;
        assert!(serde_json::from_str::<DossierPayload>(json).is_err());
    }
}
