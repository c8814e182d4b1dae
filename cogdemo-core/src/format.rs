//! Console reports for analysis results.
//!
//! Each report wraps a result and renders it through [`fmt::Display`], so
//! binaries print them with `print!("{}", ..)` and tests compare strings.

use std::fmt;

use crate::client::{
    conversation::ConversationPrediction,
    entities::{EntityRecognition, EntityTask},
    vision::TextAnalysis,
};

/// Query, top intent and entities of a conversation prediction.
pub struct ConversationReport<'a>(pub &'a ConversationPrediction);

impl fmt::Display for ConversationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prediction = self.0;

        writeln!(f, "query: {}", prediction.query)?;
        match prediction.top_intent() {
            Some(intent) => {
                writeln!(f, "category: {}", intent.category)?;
                writeln!(f, "confidence score: {}", intent.confidence_score)?;
            }
            None => writeln!(f, "category: (none)")?,
        }

        writeln!(f)?;
        writeln!(f, "entities:")?;
        for entity in &prediction.entities {
            writeln!(f)?;
            writeln!(f, "category: {}", entity.category)?;
            writeln!(f, "text: {}", entity.text)?;
            writeln!(f, "confidence score: {}", entity.confidence_score)?;
        }

        Ok(())
    }
}

/// Entities of every successfully analyzed document. Failed documents are
/// skipped.
pub struct EntityReport<'a>(pub &'a EntityRecognition);

impl fmt::Display for EntityReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recognition = self.0;

        for doc in recognition.successful() {
            if recognition.kind == EntityTask::PiiEntityRecognition {
                writeln!(
                    f,
                    "Redacted Text: {}",
                    doc.redacted_text.as_deref().unwrap_or_default()
                )?;
            }

            for entity in &doc.entities {
                writeln!(f, "Entity: {}", entity.text)?;
                writeln!(f, "\tCategory: {}", entity.category)?;
                if let Some(subcategory) = &entity.subcategory {
                    writeln!(f, "\tSubcategory: {}", subcategory)?;
                }
                writeln!(f, "\tConfidence Score: {}", entity.confidence_score)?;
                writeln!(f, "\tOffset: {}", entity.offset)?;
                writeln!(f, "\tLength: {}", entity.length)?;
            }
        }

        Ok(())
    }
}

/// Lines and words read from an image, with their bounding polygons.
pub struct TextReport<'a>(pub &'a TextAnalysis);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.0.lines {
            writeln!(f, "{}", line.content)?;
            writeln!(
                f,
                " Line: '{}', Bounding Polygon: {}",
                line.content, line.bounding_polygon
            )?;

            for word in &line.words {
                writeln!(
                    f,
                    "  Word: '{}', Bounding Polygon: {}, Confidence: {}",
                    word.content, word.bounding_polygon, word.confidence
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::{confidence::Confidence, polygon::Polygon},
        client::{
            conversation::{ConversationEntity, Intent},
            entities::{DocumentError, DocumentResult, Entity, ErrorDetail, RecognizedDocument},
            vision::{TextLine, TextWord},
        },
    };

    fn confidence(value: f64) -> Confidence {
        Confidence::new(value).unwrap()
    }

    #[test]
    fn test_conversation_report() {
        let prediction = ConversationPrediction {
            query: "Send an email to Carol".to_string(),
            intents: vec![
                Intent {
                    category: "SendEmail".to_string(),
                    confidence_score: confidence(0.96),
                },
                Intent {
                    category: "None".to_string(),
                    confidence_score: confidence(0.1),
                },
            ],
            entities: vec![ConversationEntity {
                category: "ContactName".to_string(),
                text: "Carol".to_string(),
                offset: 17,
                length: 5,
                confidence_score: confidence(1.0),
            }],
        };

        assert_eq!(
            ConversationReport(&prediction).to_string(),
            "query: Send an email to Carol\n\
             category: SendEmail\n\
             confidence score: 0.96\n\
             \n\
             entities:\n\
             \n\
             category: ContactName\n\
             text: Carol\n\
             confidence score: 1.0\n"
        );
    }

    #[test]
    fn test_conversation_report_without_intents() {
        let prediction = ConversationPrediction {
            query: "hm".to_string(),
            intents: Vec::new(),
            entities: Vec::new(),
        };
        assert_eq!(
            ConversationReport(&prediction).to_string(),
            "query: hm\ncategory: (none)\n\nentities:\n"
        );
    }

    #[test]
    fn test_entity_report_skips_failed_documents() {
        let recognition = EntityRecognition {
            kind: EntityTask::EntityRecognition,
            documents: vec![
                DocumentResult::Error(DocumentError {
                    id: "1".to_string(),
                    error: ErrorDetail {
                        code: "InvalidDocument".to_string(),
                        message: "empty".to_string(),
                    },
                }),
                DocumentResult::Success(RecognizedDocument {
                    id: "2".to_string(),
                    text: "Call 312-555-1234".to_string(),
                    entities: vec![Entity {
                        text: "312-555-1234".to_string(),
                        category: "PhoneNumber".to_string(),
                        subcategory: None,
                        offset: 5,
                        length: 12,
                        confidence_score: confidence(0.8),
                    }],
                    redacted_text: None,
                }),
            ],
            model_version: None,
        };

        assert_eq!(
            EntityReport(&recognition).to_string(),
            "Entity: 312-555-1234\n\
             \tCategory: PhoneNumber\n\
             \tConfidence Score: 0.8\n\
             \tOffset: 5\n\
             \tLength: 12\n"
        );
    }

    #[test]
    fn test_entity_report_subcategory_line() {
        let recognition = EntityRecognition {
            kind: EntityTask::PiiEntityRecognition,
            documents: vec![DocumentResult::Success(RecognizedDocument {
                id: "1".to_string(),
                text: "Meet on 4/22".to_string(),
                entities: vec![Entity {
                    text: "4/22".to_string(),
                    category: "DateTime".to_string(),
                    subcategory: Some("Date".to_string()),
                    offset: 8,
                    length: 4,
                    confidence_score: confidence(1.0),
                }],
                redacted_text: Some("Meet on ****".to_string()),
            })],
            model_version: None,
        };

        assert_eq!(
            EntityReport(&recognition).to_string(),
            "Redacted Text: Meet on ****\n\
             Entity: 4/22\n\
             \tCategory: DateTime\n\
             \tSubcategory: Date\n\
             \tConfidence Score: 1.0\n\
             \tOffset: 8\n\
             \tLength: 4\n"
        );
    }

    #[test]
    fn test_text_report() {
        let line_polygon = Polygon::from_flat(&[1.0, 2.0, 30.0, 2.0, 30.0, 9.0, 1.0, 9.0]).unwrap();
        let word_polygon = Polygon::from_flat(&[1.0, 2.0, 12.0, 2.0, 12.0, 9.0, 1.0, 9.0]).unwrap();
        let analysis = TextAnalysis {
            lines: vec![TextLine {
                content: "Abraham Lincoln".to_string(),
                bounding_polygon: line_polygon,
                words: vec![TextWord {
                    content: "Abraham".to_string(),
                    bounding_polygon: word_polygon,
                    confidence: confidence(0.995),
                }],
            }],
            metadata: None,
            model_version: None,
        };

        assert_eq!(
            TextReport(&analysis).to_string(),
            "Abraham Lincoln\n \
             Line: 'Abraham Lincoln', Bounding Polygon: ((1, 2), (30, 2), (30, 9), (1, 9))\n  \
             Word: 'Abraham', Bounding Polygon: ((1, 2), (12, 2), (12, 9), (1, 9)), Confidence: 0.995\n"
        );
    }
}
