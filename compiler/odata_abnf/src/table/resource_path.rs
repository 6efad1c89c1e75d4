//! Relative URIs and resource paths.
//!
//! Without a service model every property looks the same, so navigation
//! follows the shape of the path: after a collection comes a key, `$count`
//! or `$ref`; after a single entity comes a property, `$ref` or `$value`.

use abnf_runtime::GrammarBuilder;

pub(super) fn define(b: &mut GrammarBuilder) {
    // Dollar-prefixed segments are case-sensitive.
    b.alternation(
        "odataRelativeUri",
        &[
            "odataRelativeUri.batch",
            "odataRelativeUri.metadata",
            "odataRelativeUri.resource",
        ],
    )
    .sequence("odataRelativeUri.batch", &["'$batch'", "[batchQuery]"])
    .sequence("batchQuery", &["\"?\"", "batchOptions"])
    .sequence("odataRelativeUri.metadata", &["'$metadata'", "[metadataQuery]"])
    .sequence("metadataQuery", &["\"?\"", "metadataOptions"])
    .sequence("odataRelativeUri.resource", &["resourcePath", "[resourceQuery]"])
    .sequence("resourceQuery", &["\"?\"", "queryOptions"]);

    b.alternation(
        "resourcePath",
        &["resourcePath.entitySet", "crossjoin", "resourcePath.all"],
    )
    .sequence("resourcePath.entitySet", &["entitySetName", "[collectionNavigation]"])
    .sequence("resourcePath.all", &["'$all'", "[typeCast]"])
    .sequence(
        "crossjoin",
        &["'$crossjoin'", "OPEN", "entitySetName", "*crossjoin.more", "CLOSE"],
    )
    .sequence("crossjoin.more", &["COMMA", "entitySetName"]);

    b.sequence("typeCast", &["\"/\"", "qualifiedEntityTypeName"]);

    b.sequence("collectionNavigation", &["[typeCast]", "[collectionNavPath]"])
        .alternation("collectionNavPath", &["collectionNavPath.key", "count", "ref"])
        .sequence("collectionNavPath.key", &["keyPredicate", "[singleNavigation]"]);

    b.alternation("keyPredicate", &["simpleKey", "compoundKey"])
        .sequence("simpleKey", &["OPEN", "simpleKey.value", "CLOSE"])
        .alternation("simpleKey.value", &["parameterAlias", "keyPropertyValue"])
        .sequence(
            "compoundKey",
            &["OPEN", "keyValuePair", "*compoundKey.more", "CLOSE"],
        )
        .sequence("compoundKey.more", &["COMMA", "keyValuePair"])
        .sequence("keyValuePair", &["keyValuePair.name", "EQ", "simpleKey.value"])
        .alternation("keyValuePair.name", &["primitiveKeyProperty", "keyPropertyAlias"])
        .sequence("keyPropertyValue", &["primitiveLiteral"]);

    b.sequence("singleNavigation", &["[typeCast]", "[singleNavigation.next]"])
        .alternation(
            "singleNavigation.next",
            &["singleNavigation.property", "ref", "value"],
        )
        .sequence("singleNavigation.property", &["\"/\"", "propertyPath"])
        .sequence("propertyPath", &["navigationProperty", "[propertyPath.next]"])
        .alternation("propertyPath.next", &["collectionNavPath", "singleNavigation"]);

    b.literal("count", "/$count", true)
        .literal("ref", "/$ref", true)
        .literal("value", "/$value", true);
}
