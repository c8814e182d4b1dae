use serde::Deserialize;

use crate::analysis::{confidence::Confidence, polygon::Polygon};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisResponse {
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub metadata: Option<ImageMetadata>,
    #[serde(default)]
    pub read_result: Option<ReadResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadResult {
    #[serde(default)]
    pub blocks: Vec<ReadBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadBlock {
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

/// A line of text detected in the image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    #[serde(rename = "text")]
    pub content: String,
    pub bounding_polygon: Polygon,
    /// Words of the line, in reading order.
    #[serde(default)]
    pub words: Vec<TextWord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextWord {
    #[serde(rename = "text")]
    pub content: String,
    pub bounding_polygon: Polygon,
    pub confidence: Confidence,
}

/// Text read from one image.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnalysis {
    pub lines: Vec<TextLine>,
    pub metadata: Option<ImageMetadata>,
    pub model_version: Option<String>,
}

impl From<ImageAnalysisResponse> for TextAnalysis {
    fn from(response: ImageAnalysisResponse) -> Self {
        let lines = response
            .read_result
            .map(|read| read.blocks.into_iter().flat_map(|block| block.lines).collect())
            .unwrap_or_default();

        Self {
            lines,
            metadata: response.metadata,
            model_version: response.model_version,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Line,
    Word,
}

/// A polygon to outline on the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    /// Index of the owning line.
    pub line: usize,
    pub polygon: Polygon,
}

impl TextAnalysis {
    /// Polygons to draw, line by line.
    ///
    /// A line with words contributes one polygon per word and none for
    /// itself. A line without words contributes its own polygon.
    pub fn annotations(&self) -> Vec<Annotation> {
        let mut annotations = Vec::new();

        for (line_idx, line) in self.lines.iter().enumerate() {
            if line.words.is_empty() {
                annotations.push(Annotation {
                    kind: AnnotationKind::Line,
                    line: line_idx,
                    polygon: line.bounding_polygon,
                });
                continue;
            }

            annotations.extend(line.words.iter().map(|word| Annotation {
                kind: AnnotationKind::Word,
                line: line_idx,
                polygon: word.bounding_polygon,
            }));
        }

        annotations
    }

    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| line.words.len()).sum()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;

    pub(crate) fn sample_response() -> serde_json::Value {
        json!({
            "modelVersion": "2023-10-01",
            "metadata": { "width": 64, "height": 48 },
            "readResult": {
                "blocks": [{
                    "lines": [
                        {
                            "text": "Four score",
                            "boundingPolygon": [
                                { "x": 4, "y": 4 }, { "x": 40, "y": 4 },
                                { "x": 40, "y": 14 }, { "x": 4, "y": 14 }
                            ],
                            "words": [
                                {
                                    "text": "Four",
                                    "boundingPolygon": [
                                        { "x": 4, "y": 4 }, { "x": 20, "y": 4 },
                                        { "x": 20, "y": 14 }, { "x": 4, "y": 14 }
                                    ],
                                    "confidence": 0.993
                                },
                                {
                                    "text": "score",
                                    "boundingPolygon": [
                                        { "x": 24, "y": 4 }, { "x": 40, "y": 4 },
                                        { "x": 40, "y": 14 }, { "x": 24, "y": 14 }
                                    ],
                                    "confidence": 0.981
                                }
                            ]
                        },
                        {
                            "text": "1863",
                            "boundingPolygon": [4, 24, 30, 24, 30, 40, 4, 40]
                        }
                    ]
                }]
            }
        })
    }

    #[test]
    fn test_lines_are_flattened_from_blocks() {
        let response: ImageAnalysisResponse = serde_json::from_value(sample_response()).unwrap();
        let analysis = TextAnalysis::from(response);

        assert_eq!(analysis.lines.len(), 2);
        assert_eq!(analysis.lines[0].content, "Four score");
        assert_eq!(analysis.lines[1].content, "1863");
        assert_eq!(analysis.word_count(), 2);
        assert_eq!(
            analysis.metadata,
            Some(ImageMetadata {
                width: 64,
                height: 48
            })
        );
    }

    #[test]
    fn test_missing_read_result_has_no_lines() {
        let response: ImageAnalysisResponse =
            serde_json::from_value(json!({ "modelVersion": "2023-10-01" })).unwrap();
        let analysis = TextAnalysis::from(response);
        assert!(analysis.lines.is_empty());
        assert!(analysis.annotations().is_empty());
    }

    #[test]
    fn test_annotations_prefer_words_over_lines() {
        let response: ImageAnalysisResponse = serde_json::from_value(sample_response()).unwrap();
        let analysis = TextAnalysis::from(response);
        let annotations = analysis.annotations();

        // line 0 has two words: two word polygons, no line polygon
        let line0: Vec<_> = annotations.iter().filter(|a| a.line == 0).collect();
        assert_eq!(line0.len(), 2);
        assert!(line0.iter().all(|a| a.kind == AnnotationKind::Word));

        // line 1 has no words: exactly its own polygon
        let line1: Vec<_> = annotations.iter().filter(|a| a.line == 1).collect();
        assert_eq!(line1.len(), 1);
        assert_eq!(line1[0].kind, AnnotationKind::Line);
        assert_eq!(line1[0].polygon, analysis.lines[1].bounding_polygon);
    }

    #[test]
    fn test_word_confidence_out_of_range() {
        let mut value = sample_response();
        value["readResult"]["blocks"][0]["lines"][0]["words"][0]["confidence"] = json!(-0.1);
        assert!(serde_json::from_value::<ImageAnalysisResponse>(value).is_err());
    }
}
