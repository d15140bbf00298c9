use serde::Serialize;
use sortable_conf::SortClasses;
use sortable_templates::Direction;

use crate::query::form_encode;
use crate::request::Request;

const SORT_PARAM: &str = "sort";
const DIR_PARAM: &str = "dir";

/// Link target and state for one sortable column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SortLink {
    /// `path?sort=...` with every `&` written as `&amp;`.
    pub url: String,
    pub css_class: String,
    /// Whether the request is currently sorted by this field.
    pub is_current: bool,
    /// Direction the request is currently sorted in, normalized.
    pub active_direction: Direction,
    /// Direction the link asks for when followed.
    pub next_direction: Direction,
}

impl SortLink {
    /// Work out where a column link points, given the current request.
    ///
    /// `sort` and `dir` are stripped from the query; every other parameter is
    /// carried over in order. The sorted column flips its direction, any
    /// other column asks for its own default.
    pub fn build<R: Request + ?Sized>(
        request: &R,
        field: &str,
        default_direction: Direction,
        classes: &SortClasses,
    ) -> Self {
        let mut params = request.query().clone();

        let sort_field = params.remove(SORT_PARAM).and_then(|mut values| values.pop());
        let dir_param = params.remove(DIR_PARAM).and_then(|mut values| values.pop());
        let active_direction = Direction::from_param(dir_param.as_deref());

        let is_current = sort_field.as_deref() == Some(field);

        let next_direction = if is_current {
            active_direction.inverse()
        } else {
            default_direction
        };

        let css_class = if is_current {
            match active_direction {
                Direction::Asc => &classes.ascending,
                Direction::Desc => &classes.descending,
            }
        } else {
            &classes.unsorted
        };

        params.set(DIR_PARAM, next_direction.as_str());

        let url = format!(
            "{}?{}={}&{}",
            request.path(),
            SORT_PARAM,
            form_encode(field),
            params.urlencode()
        )
        .replace('&', "&amp;");

        tracing::debug!(
            field,
            sorted_by = sort_field.as_deref().unwrap_or_default(),
            %active_direction,
            %next_direction,
            is_current,
            "built sort link"
        );

        Self {
            url,
            css_class: css_class.clone(),
            is_current,
            active_direction,
            next_direction,
        }
    }
}
