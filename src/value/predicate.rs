//! Callables paired with their rendered source text.

use std::borrow::Cow;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use super::{Deferred, Failure, Value};

type Call = dyn Fn(&[Value]) -> Result<Value, Value> + Send + Sync;

/// A callable plus the source text failure messages are rebuilt from.
///
/// The callable returns `Ok` for a returned value and `Err` for a thrown
/// one. Panics are caught by [`Predicate::invoke`] and reported as thrown
/// `Panic` failures.
///
/// # Example
///
/// ```rust
/// use avow::{Predicate, Value};
///
/// let eq = Predicate::new("function eq(a, b) { return a === b; }", |argv| {
///     Ok(Value::from(argv.first() == argv.get(1)))
/// });
///
/// assert_eq!(eq.name(), Some("eq"));
/// assert_eq!(eq.invoke(&[Value::from(1), Value::from(1)]), Ok(Value::from(true)));
/// ```
#[derive(Clone)]
pub struct Predicate {
    name: Option<Cow<'static, str>>,
    source: Cow<'static, str>,
    call: Arc<Call>,
}

impl Predicate {
    /// Create a predicate from its source text and implementation.
    ///
    /// A named function head (`function eq(..) {`) also names the predicate.
    pub fn new<F>(source: impl Into<Cow<'static, str>>, call: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        let source = source.into();
        let syntax = &crate::config::get().syntax;
        let name = crate::source::declared_name(&source, syntax).map(Cow::Owned);

        Self {
            name,
            source,
            call: Arc::new(call),
        }
    }

    /// Create a predicate whose source is opaque.
    pub fn native<F>(name: &'static str, call: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self {
            name: Some(Cow::Borrowed(name)),
            source: Cow::Owned(format!("function {name}() {{ [native code] }}")),
            call: Arc::new(call),
        }
    }

    /// Override the predicate's name.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The predicate's name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The rendered source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Invoke the predicate, turning a panic into a thrown failure.
    ///
    /// # Errors
    ///
    /// Returns the thrown value when the predicate throws or panics.
    pub fn invoke(&self, argv: &[Value]) -> Result<Value, Value> {
        catch_unwind(AssertUnwindSafe(|| (self.call)(argv)))
            .unwrap_or_else(|payload| Err(Failure::panic(payload.as_ref()).into()))
    }

    /// Returns `true` if both handles share one implementation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Conversion from a predicate body's result into a returned or thrown value.
///
/// Used by [`predicate!`](crate::predicate) so bodies can evaluate to a
/// plain `bool`, a [`Value`], a [`Failure`] or a `Result`.
pub trait IntoReturn {
    /// Convert into `Ok` (returned) or `Err` (thrown).
    ///
    /// # Errors
    ///
    /// `Err` carries the thrown value.
    fn into_return(self) -> Result<Value, Value>;
}

impl IntoReturn for bool {
    fn into_return(self) -> Result<Value, Value> {
        Ok(Value::Bool(self))
    }
}

impl IntoReturn for Value {
    fn into_return(self) -> Result<Value, Value> {
        Ok(self)
    }
}

impl IntoReturn for Failure {
    fn into_return(self) -> Result<Value, Value> {
        Ok(Value::Error(self))
    }
}

impl IntoReturn for Deferred {
    fn into_return(self) -> Result<Value, Value> {
        Ok(Value::Future(self))
    }
}

impl<T, E> IntoReturn for Result<T, E>
where
    T: Into<Value>,
    E: Into<Value>,
{
    fn into_return(self) -> Result<Value, Value> {
        self.map(Into::into).map_err(Into::into)
    }
}

/// Build a [`Predicate`] from a closure or function item, keeping its source.
///
/// Parameters are bound to the call's arguments as [`Value`]s; missing
/// arguments bind to [`Value::Undefined`].
///
/// # Example
///
/// ```rust
/// use avow::{predicate, Value};
///
/// let eq = predicate!(|a, b| a == b);
/// assert_eq!(eq.invoke(&[Value::from(1), Value::from(1)]), Ok(Value::from(true)));
///
/// let positive = predicate!(fn positive(n) { n.is_truthy() });
/// assert_eq!(positive.name(), Some("positive"));
/// ```
#[macro_export]
macro_rules! predicate {
    (fn $name:ident ( $($param:ident),* $(,)? ) $body:block) => {{
        $crate::Predicate::new(
            ::std::stringify!(fn $name($($param),*) $body),
            move |argv: &[$crate::Value]| {
                #[allow(unused_mut, unused_variables)]
                let mut args = argv.iter().cloned();
                $(
                    #[allow(unused_variables)]
                    let $param: $crate::Value = args.next().unwrap_or_default();
                )*
                $crate::value::IntoReturn::into_return((|| $body)())
            },
        )
        .named(::std::stringify!($name))
    }};
    (|| $body:expr) => {{
        $crate::Predicate::new(
            ::std::stringify!(|| $body),
            move |_argv: &[$crate::Value]| $crate::value::IntoReturn::into_return((|| $body)()),
        )
    }};
    (|$($param:ident),+ $(,)?| $body:expr) => {{
        $crate::Predicate::new(
            ::std::stringify!(|$($param),+| $body),
            move |argv: &[$crate::Value]| {
                #[allow(unused_mut, unused_variables)]
                let mut args = argv.iter().cloned();
                $(
                    #[allow(unused_variables)]
                    let $param: $crate::Value = args.next().unwrap_or_default();
                )+
                $crate::value::IntoReturn::into_return((|| $body)())
            },
        )
    }};
}
