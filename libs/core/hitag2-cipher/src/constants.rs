// [libs/core/hitag2-cipher/src/constants.rs]
/*!
 * =================================================================
 * APARATO: HITAG2 CIPHER CONSTANTS
 * CLASIFICACIÓN: CORE PRIMITIVE DATA (ESTRATO L1)
 * RESPONSABILIDAD: TABLAS Y POSICIONES FIJAS DEL FILTRO Y LA
 *                   RETROALIMENTACIÓN LINEAL
 *
 * Estas constantes forman el contrato de cable con el simulador
 * (colaborador externo): deben coincidir bit-a-bit para que el ataque
 * de correlación tenga alguna oportunidad de converger. Se fijan aquí
 * como datos puros, sin lógica, siguiendo la convención de
 * `generator_table.rs` del motor matemático hermano.
 * =================================================================
 */

/// Número de bits del registro de desplazamiento del generador.
pub const STATE_BITS: u32 = 48;

/// Máscara de los 48 bits significativos del estado (bits 48..64 siempre en cero).
pub const STATE_MASK: u64 = (1u64 << STATE_BITS) - 1;

/// Posiciones del registro (0 = LSB / más reciente) que participan en el
/// polinomio de retroalimentación lineal. El nuevo bit de entrada es el
/// XOR de los bits del estado en estas posiciones.
pub const FEEDBACK_TAPS: [u8; 6] = [47, 43, 26, 15, 6, 1];

/// Las 20 posiciones de estado de las que depende la función de filtro `f`.
///
/// Las primeras 16 alimentan cuatro instancias de `fa`/`fb` sobre
/// fragmentos disjuntos de 4 bits; las últimas 4 perturban (XOR) las
/// cuatro salidas antes de la combinación final en `fc`.
pub const FILTER_POSITIONS: [u8; 20] = [
    2, 3, 5, 6, 8, 12, 14, 15, 17, 21, 23, 26, 28, 29, 31, 33, 34, 43, 44, 46,
];

/// Tabla de verdad de 16 entradas de la no linealidad `fa` (primera y cuarta ranura).
pub const FA_TABLE: [u8; 16] = [0, 0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 1];

/// Tabla de verdad de 16 entradas de la no linealidad `fb` (segunda y tercera ranura).
pub const FB_TABLE: [u8; 16] = [1, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 0, 0, 1, 1, 0];

/// Tabla de verdad de 16 entradas de la combinación final `fc`.
pub const FC_TABLE: [u8; 16] = [0, 1, 1, 0, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 0];
