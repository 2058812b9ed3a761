// [libs/domain/hitag2-attack/src/error.rs]
/*!
 * APARATO: ATTACK ERROR CATALOG
 * RESPONSABILIDAD: TAXONOMÍA DE FALLOS DEL NÚCLEO DE RECUPERACIÓN
 *
 * Tres familias: entrada inválida (rechazada en la frontera, antes de
 * iniciar la búsqueda), `NoKeyFound` (resultado informativo, no un
 * fallo del sistema) y `ResourceError` (fatal). No hay pánicos
 * internos; toda aritmética usa tipos de ancho fijo con comportamiento
 * definido.
 */

use thiserror::Error;

/// Errores que puede reportar `recover_key`.
#[derive(Debug, Error, PartialEq)]
pub enum AttackError {
    /// Se proporcionó un conjunto de observaciones vacío.
    #[error("se requiere al menos una observación (IV, keystream)")]
    NoObservations,

    /// `epsilon` fuera del rango abierto `(0, 0.5)`.
    #[error("epsilon debe estar en (0, 0.5), se recibió {epsilon}")]
    InvalidEpsilon {
        /// Valor de epsilon rechazado.
        epsilon: f64,
    },

    /// El ancho de haz `T` es demasiado pequeño para ser útil.
    #[error("T debe ser al menos 2, se recibió {t}")]
    InvalidT {
        /// Valor de T rechazado.
        t: u32,
    },

    /// La búsqueda en haz se agotó sin que ningún candidato verificara.
    #[error("ningún candidato reprodujo las observaciones; intente con T más grande o más observaciones")]
    NoKeyFound,

    /// Fallo irrecuperable al reservar los búferes del haz.
    #[error("fallo de asignación de recursos: {0}")]
    ResourceError(String),
}
