//! Names and identifiers.

use abnf_runtime::GrammarBuilder;

pub(super) fn define(b: &mut GrammarBuilder) {
    b.sequence(
        "odataIdentifier",
        &["identifierLeadingCharacter", "*127identifierCharacter"],
    )
    .alternation("identifierLeadingCharacter", &["ALPHA", "\"_\""])
    .alternation("identifierCharacter", &["ALPHA", "\"_\"", "DIGIT"]);

    b.sequence("namespace", &["namespacePart", "*namespace.part"])
        .sequence("namespace.part", &["\".\"", "namespacePart"])
        .sequence("namespacePart", &["odataIdentifier"]);

    // `namespace "." odataIdentifier` would let the namespace swallow the
    // final segment, so the last dot is spelled out.
    b.sequence("qualifiedName", &["odataIdentifier", "1*qualifiedName.part"])
        .sequence("qualifiedName.part", &["\".\"", "odataIdentifier"])
        .sequence("qualifiedEntityTypeName", &["qualifiedName"]);

    for alias in [
        "entitySetName",
        "navigationProperty",
        "primitiveKeyProperty",
        "keyPropertyAlias",
        "parameterName",
    ] {
        b.sequence(alias, &["odataIdentifier"]);
    }

    b.sequence("parameterAlias", &["AT", "odataIdentifier"]);
}
