/// Header carrying the resource key on every Azure AI services request.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// API version of the language service (conversations and text analysis).
pub const LANGUAGE_API_VERSION: &str = "2023-04-01";

/// API version of the image analysis service.
pub const VISION_API_VERSION: &str = "2023-10-01";

pub const CONVERSATION_PATH: &str = "language/:analyze-conversations";
pub const TEXT_ANALYSIS_PATH: &str = "language/:analyze-text";
pub const IMAGE_ANALYSIS_PATH: &str = "computervision/imageanalysis:analyze";

/// Image analysis feature selector for text extraction (OCR).
pub const READ_FEATURE: &str = "read";

/// Language tag attached to every submitted query and document.
pub const DEFAULT_LANGUAGE: &str = "en";

pub const TEXT_MODALITY: &str = "text";
pub const PARTICIPANT_ID: &str = "1";
pub const CONVERSATION_ITEM_ID: &str = "1";

/// Offsets and lengths returned by the language service are counted in
/// Unicode code points, so they index `str::chars()` directly.
pub const STRING_INDEX_TYPE: &str = "UnicodeCodePoint";

/// Model version requested for entity recognition.
pub const TEXT_MODEL_VERSION: &str = "latest";

/// The only project kind the conversation client understands.
pub const CONVERSATION_PROJECT_KIND: &str = "Conversation";

/// Utterance analyzed when `clu` is run without an argument.
pub const DEFAULT_QUERY: &str = "Send an email to Carol about tomorrow's demo";

/// Document analyzed when `entities` is run without arguments.
pub const DEFAULT_DOCUMENT: &str = "Call our office at 312-555-1234 and ask for Graham Barnes, or send an email to support@contoso.com.";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of characters of an unparseable error body kept in
/// error messages.
pub const ERROR_BODY_LIMIT: usize = 1024;

/// Number of vertices in every bounding polygon returned by the read API.
///
/// On the wire a polygon is either 8 flat numbers `[x0, y0, .., x3, y3]`
/// or 4 `{ "x": .., "y": .. }` points. Anything else is rejected.
pub const POLYGON_VERTICES: usize = 4;

/// Outline color for bounding polygons (cyan).
pub const POLYGON_COLOR: [u8; 3] = [0, 255, 255];

/// Outline stroke width for bounding polygons, in pixels.
///
/// The outline is drawn as shifted copies of the polygon, so odd values
/// produce a stroke centered on the polygon edge.
pub const POLYGON_STROKE_WIDTH: u32 = 3;

/// Annotated image written by `read-text`, overwritten on every run.
pub const OUTPUT_FILE: &str = "text.jpg";

pub const SAMPLE_IMAGE_DIR: &str = "images";
pub const PRINTED_SAMPLE_IMAGE: &str = "Lincoln.jpg";
pub const HANDWRITTEN_SAMPLE_IMAGE: &str = "Note.jpg";

pub const ENDPOINT_ENV_NAME: &str = "AI_SERVICE_ENDPOINT";
pub const KEY_ENV_NAME: &str = "AI_SERVICE_KEY";
pub const PROJECT_ENV_NAME: &str = "CLU_PROJECT_NAME";
pub const DEPLOYMENT_ENV_NAME: &str = "CLU_DEPLOYMENT_NAME";
