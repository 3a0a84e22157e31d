//! Fixed user-facing strings shown by the panel.

/// Result placeholder before any submission and after a reset.
pub const NO_RESULT_YET: &str = "Sin cálculo aún.";
/// Result placeholder while a prediction is pending.
pub const CALCULATING: &str = "Calculando...";
pub const METADATA_LOAD_FAILED: &str =
    "No fue posible cargar la información inicial. Verifique que la API esté ejecutándose.";
pub const SELECT_COUNTRY: &str = "Por favor seleccione un país.";
/// Result text for every model when the API answers with a non-2xx status.
pub const CALCULATION_FAILED: &str = "No fue posible calcular.";
pub const REQUEST_FAILED: &str = "Ocurrió un error al procesar la solicitud.";
pub const PREDICTION_UNAVAILABLE: &str = "No se pudo obtener la predicción.";
pub const CLASSIFICATION_UNAVAILABLE: &str = "No se pudo obtener la clasificación.";
/// Result text for every model when the API cannot be reached.
pub const CONNECTION_ERROR: &str = "Error de conexión.";
pub const API_UNREACHABLE: &str =
    "No se pudo contactar la API. Revise que el backend esté ejecutándose.";
/// Hint text before metadata arrives.
pub const HINT_PLACEHOLDER: &str = "Rango sugerido: —";
/// Value sent for `Status` when the form does not provide one.
pub const DEFAULT_STATUS: &str = "Developing";
/// Heading of the fallback window shown when the panel cannot start.
pub const LAUNCH_FAILED: &str = "No fue posible iniciar la interfaz.";
pub const CONFIG_LOAD_FAILED: &str =
    "No fue posible cargar la configuración. Revise el registro para más detalles.";
