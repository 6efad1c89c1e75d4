//! Primitive literal values.
//!
//! Temporal and geo literals are declared but not written yet; see
//! [`KNOWN_STUBS`](crate::KNOWN_STUBS).

use abnf_runtime::GrammarBuilder;

pub(super) fn define(b: &mut GrammarBuilder) {
    // Order matters: a GUID starts with what reads as a number, and every
    // integer is also a decimal.
    b.alternation(
        "primitiveLiteral",
        &["nullValue", "booleanValue", "guidValue", "decimalValue", "string"],
    );

    b.literal("nullValue", "null", true)
        .alternation("booleanValue", &["\"true\"", "\"false\""]);

    b.sequence(
        "guidValue",
        &["8HEXDIG", "\"-\"", "4HEXDIG", "\"-\"", "4HEXDIG", "\"-\"", "4HEXDIG", "\"-\"", "12HEXDIG"],
    );

    b.alternation("decimalValue", &["decimalValue.number", "nanInfinity"])
        .sequence(
            "decimalValue.number",
            &["[SIGN]", "1*DIGIT", "[decimalValue.fraction]", "[decimalValue.exponent]"],
        )
        .sequence("decimalValue.fraction", &["\".\"", "1*DIGIT"])
        .sequence("decimalValue.exponent", &["\"e\"", "[SIGN]", "1*DIGIT"])
        .alternation("nanInfinity", &["'NaN'", "'-INF'", "'INF'"])
        .sequence("doubleValue", &["decimalValue"]);

    b.sequence("int32Value", &["[SIGN]", "1*10DIGIT"])
        .sequence("int64Value", &["[SIGN]", "1*19DIGIT"]);

    b.sequence("string", &["SQUOTE", "*string.char", "SQUOTE"])
        .alternation("string.char", &["SQUOTE-in-string", "pchar-no-SQUOTE"])
        .sequence("SQUOTE-in-string", &["SQUOTE", "SQUOTE"]);

    // Everything a literal can be, stubs included. Not an entry point:
    // parsing from here is refused until the stubs are written.
    b.alternation(
        "primitiveValue",
        &[
            "nullValue",
            "booleanValue",
            "guidValue",
            "dateTimeOffsetValue",
            "dateValue",
            "timeOfDayValue",
            "decimalValue",
            "string",
            "durationValue",
            "geographyPoint",
            "geometryPoint",
        ],
    );

    for stub in crate::KNOWN_STUBS {
        b.unimplemented(stub);
    }
}
