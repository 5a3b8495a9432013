use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use visado_condition::{parse, ConditionError, Expr};

/// Memoizes parsed condition ASTs per distinct expression string.
///
/// Expressions repeat across many applicants while profiles vary per
/// call, so the AST is the only thing worth caching. Parse failures are
/// not cached: they are rare (authoring-time validation rejects them)
/// and keeping them out means a corrected rule set needs no cache
/// invalidation.
#[derive(Default)]
pub struct ExprCache {
    inner: RwLock<HashMap<String, Arc<Expr>>>,
}

impl ExprCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parsed(&self, expression: &str) -> Result<Arc<Expr>, ConditionError> {
        {
            let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
            if let Some(expr) = map.get(expression) {
                return Ok(Arc::clone(expr));
            }
        }

        let expr = Arc::new(parse(expression)?);
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        // A racing caller may have inserted first; keep whichever is there
        let entry = map
            .entry(expression.to_owned())
            .or_insert_with(|| Arc::clone(&expr));
        Ok(Arc::clone(entry))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}
