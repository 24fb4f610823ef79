//! `allOf`, `anyOf`, `oneOf` and `not`.

use crate::schema::failure::FailureCause;
use crate::schema::model::Schema;
use crate::schema::registry::{KeywordContext, KeywordValidator};
use serde_json::Value;

/// `allOf`: every subschema accepts the value; the first rejection is chained.
pub struct AllOf;

impl KeywordValidator for AllOf {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        _argument: &Value,
    ) -> Result<(), FailureCause> {
        let schemas = subschema_list(cx, "allOf")?;
        for (index, schema) in schemas.iter().enumerate() {
            cx.descend(data, schema)
                .map_err(|failure| FailureCause::nested(format!("allOf[{}]", index), failure))?;
        }
        Ok(())
    }
}

/// `anyOf`: at least one subschema accepts the value.
pub struct AnyOf;

impl KeywordValidator for AnyOf {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        _argument: &Value,
    ) -> Result<(), FailureCause> {
        let schemas = subschema_list(cx, "anyOf")?;
        if schemas.iter().any(|schema| cx.descend(data, schema).is_ok()) {
            return Ok(());
        }
        Err(FailureCause::constraint(format!(
            "Value must match at least one of {} schemas",
            schemas.len()
        )))
    }
}

/// `oneOf`: exactly one subschema accepts the value.
pub struct OneOf;

impl KeywordValidator for OneOf {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        _argument: &Value,
    ) -> Result<(), FailureCause> {
        let schemas = subschema_list(cx, "oneOf")?;
        let matched = schemas
            .iter()
            .filter(|schema| cx.descend(data, schema).is_ok())
            .count();
        match matched {
            1 => Ok(()),
            0 => Err(FailureCause::constraint(format!(
                "Value must match exactly one of {} schemas, matched none",
                schemas.len()
            ))),
            n => Err(FailureCause::constraint(format!(
                "Value must match exactly one of {} schemas, matched {}",
                schemas.len(),
                n
            ))),
        }
    }
}

/// `not`: the subschema rejects the value.
pub struct Not;

impl KeywordValidator for Not {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        _argument: &Value,
    ) -> Result<(), FailureCause> {
        let schema = cx.schema().subschema("not").ok_or(FailureCause::InvalidArgument {
            expected: "a schema",
        })?;
        if cx.descend(data, schema).is_ok() {
            return Err(FailureCause::constraint(
                "Value must not match the schema in 'not'",
            ));
        }
        Ok(())
    }
}

fn subschema_list<'a>(
    cx: &'a KeywordContext<'_>,
    keyword: &str,
) -> Result<&'a [Schema], FailureCause> {
    let schemas = cx.schema().subschemas(keyword);
    if schemas.is_empty() {
        return Err(FailureCause::InvalidArgument {
            expected: "a non-empty array of schemas",
        });
    }
    Ok(schemas)
}
