//! `items`, `maxItems`, `minItems` and `uniqueItems`.

use crate::schema::failure::FailureCause;
use crate::schema::keywords::{bool_argument, count_argument, values_equal};
use crate::schema::registry::{KeywordContext, KeywordValidator};
use serde_json::Value;

/// `items`: every element is validated against the item schema.
pub struct Items;

impl KeywordValidator for Items {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        _argument: &Value,
    ) -> Result<(), FailureCause> {
        let elements = array_data(data)?;
        let item_schema = cx.schema().subschema("items").ok_or(FailureCause::InvalidArgument {
            expected: "a schema",
        })?;

        for (index, element) in elements.iter().enumerate() {
            cx.descend(element, item_schema)
                .map_err(|failure| FailureCause::nested(format!("[{}]", index), failure))?;
        }
        Ok(())
    }
}

/// `maxItems`.
pub struct MaxItems;

impl KeywordValidator for MaxItems {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let elements = array_data(data)?;
        let max = count_argument(argument)?;
        if elements.len() > max {
            return Err(FailureCause::constraint(format!(
                "Array of {} items must contain at most {} items",
                elements.len(),
                max
            )));
        }
        Ok(())
    }
}

/// `minItems`.
pub struct MinItems;

impl KeywordValidator for MinItems {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let elements = array_data(data)?;
        let min = count_argument(argument)?;
        if elements.len() < min {
            return Err(FailureCause::constraint(format!(
                "Array of {} items must contain at least {} items",
                elements.len(),
                min
            )));
        }
        Ok(())
    }
}

/// `uniqueItems`.
pub struct UniqueItems;

impl KeywordValidator for UniqueItems {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let elements = array_data(data)?;
        if !bool_argument(argument)? {
            return Ok(());
        }

        for (i, a) in elements.iter().enumerate() {
            if let Some(j) = elements[i + 1..].iter().position(|b| values_equal(a, b)) {
                return Err(FailureCause::constraint(format!(
                    "Items at positions {} and {} are equal",
                    i,
                    i + 1 + j
                )));
            }
        }
        Ok(())
    }
}

fn array_data(data: &Value) -> Result<&Vec<Value>, FailureCause> {
    data.as_array()
        .ok_or(FailureCause::InvalidData { expected: "an array" })
}
