use super::descriptor::VariableDescriptor;
use crate::FmuError;
use crate::types::{Value, ValueType};
use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::ptr::NonNull;

/// A getter/setter pair standing in for a storage cell.
pub struct Accessor<T> {
    getter: Box<dyn Fn() -> T>,
    setter: Box<dyn FnMut(T)>,
}

impl<T: 'static> Accessor<T> {
    pub fn new(getter: impl Fn() -> T + 'static, setter: impl FnMut(T) + 'static) -> Self {
        Self {
            getter: Box::new(getter),
            setter: Box::new(setter),
        }
    }
}

/// Where a variable's value lives.
///
/// Pointer variants do not own the cell they point to; whoever creates them
/// guarantees the cell outlives the binding (see [`VariableBinding::from_ref`]).
pub enum VariableBinding {
    RealPtr(NonNull<f64>),
    IntegerPtr(NonNull<i32>),
    BooleanPtr(NonNull<bool>),
    StringPtr(NonNull<String>),
    RealFn(Accessor<f64>),
    IntegerFn(Accessor<i32>),
    BooleanFn(Accessor<bool>),
    StringFn(Accessor<String>),
}

impl fmt::Debug for VariableBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RealPtr(p) => f.debug_tuple("RealPtr").field(p).finish(),
            Self::IntegerPtr(p) => f.debug_tuple("IntegerPtr").field(p).finish(),
            Self::BooleanPtr(p) => f.debug_tuple("BooleanPtr").field(p).finish(),
            Self::StringPtr(p) => f.debug_tuple("StringPtr").field(p).finish(),
            Self::RealFn(_) => f.write_str("RealFn(<accessor>)"),
            Self::IntegerFn(_) => f.write_str("IntegerFn(<accessor>)"),
            Self::BooleanFn(_) => f.write_str("BooleanFn(<accessor>)"),
            Self::StringFn(_) => f.write_str("StringFn(<accessor>)"),
        }
    }
}

/// A Rust scalar that maps onto one FMI value type.
pub trait ScalarValue: Clone + Sized + 'static {
    const VALUE_TYPE: ValueType;

    fn pointer_binding(ptr: NonNull<Self>) -> VariableBinding;
    fn accessor_binding(accessor: Accessor<Self>) -> VariableBinding;
    fn read(binding: &VariableBinding) -> Option<Self>;
    /// Returns `false` if the binding holds another type.
    fn write(binding: &mut VariableBinding, value: Self) -> bool;
    fn into_value(self) -> Value;
}

macro_rules! impl_scalar_value {
    ($ty:ty, $value_type:ident, $ptr:ident, $acc:ident) => {
        impl ScalarValue for $ty {
            const VALUE_TYPE: ValueType = ValueType::$value_type;

            fn pointer_binding(ptr: NonNull<Self>) -> VariableBinding {
                VariableBinding::$ptr(ptr)
            }

            fn accessor_binding(accessor: Accessor<Self>) -> VariableBinding {
                VariableBinding::$acc(accessor)
            }

            fn read(binding: &VariableBinding) -> Option<Self> {
                match binding {
                    // SAFETY: the creator of the pointer binding guarantees the cell is alive.
                    VariableBinding::$ptr(p) => Some(unsafe { p.as_ref() }.clone()),
                    VariableBinding::$acc(acc) => Some((acc.getter)()),
                    _ => None,
                }
            }

            fn write(binding: &mut VariableBinding, value: Self) -> bool {
                match binding {
                    VariableBinding::$ptr(p) => {
                        // SAFETY: as above; the component is the sole writer of the cell.
                        unsafe { *p.as_ptr() = value };
                        true
                    }
                    VariableBinding::$acc(acc) => {
                        (acc.setter)(value);
                        true
                    }
                    _ => false,
                }
            }

            fn into_value(self) -> Value {
                Value::$value_type(self)
            }
        }
    };
}

impl_scalar_value!(f64, Real, RealPtr, RealFn);
impl_scalar_value!(i32, Integer, IntegerPtr, IntegerFn);
impl_scalar_value!(bool, Boolean, BooleanPtr, BooleanFn);
impl_scalar_value!(String, String, StringPtr, StringFn);

impl VariableBinding {
    /// Binds directly to a storage cell.
    ///
    /// # Safety
    /// The cell must stay at the same address and outlive every use of the
    /// returned binding (in practice: the component that registers it), and
    /// must not be accessed through other references while the component
    /// reads or writes it.
    pub unsafe fn from_ref<T: ScalarValue>(cell: &mut T) -> Self {
        T::pointer_binding(NonNull::from(cell))
    }

    /// Binds to a getter/setter pair.
    pub fn from_accessors<T: ScalarValue>(
        getter: impl Fn() -> T + 'static,
        setter: impl FnMut(T) + 'static,
    ) -> Self {
        T::accessor_binding(Accessor::new(getter, setter))
    }

    /// Binds to a getter whose setter discards every value.
    pub fn read_only<T: ScalarValue>(getter: impl Fn() -> T + 'static) -> Self {
        Self::from_accessors(getter, |_: T| {})
    }

    /// The value type of the active variant.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::RealPtr(_) | Self::RealFn(_) => ValueType::Real,
            Self::IntegerPtr(_) | Self::IntegerFn(_) => ValueType::Integer,
            Self::BooleanPtr(_) | Self::BooleanFn(_) => ValueType::Boolean,
            Self::StringPtr(_) | Self::StringFn(_) => ValueType::String,
        }
    }

    /// Reads the current value.
    pub fn get<T: ScalarValue>(&self) -> Result<T, FmuError> {
        T::read(self).ok_or(FmuError::TypeMismatch {
            expected: self.value_type(),
            found: T::VALUE_TYPE,
        })
    }

    /// Writes a value through the pointer or the setter.
    pub fn set<T: ScalarValue>(&mut self, value: T) -> Result<(), FmuError> {
        let expected = self.value_type();
        if T::write(self, value) {
            Ok(())
        } else {
            Err(FmuError::TypeMismatch {
                expected,
                found: T::VALUE_TYPE,
            })
        }
    }

    /// Reads the current value as a type-erased [`Value`].
    pub fn current_value(&self) -> Value {
        match self.value_type() {
            ValueType::Real => Value::Real(f64::read(self).unwrap_or_default()),
            ValueType::Integer => Value::Integer(i32::read(self).unwrap_or_default()),
            ValueType::Boolean => Value::Boolean(bool::read(self).unwrap_or_default()),
            ValueType::String => Value::String(String::read(self).unwrap_or_default()),
        }
    }

    /// Stores the current bound value as the descriptor's start value when
    /// the descriptor requires one. Called once, at registration.
    pub fn expose_current_value_as_start(
        &self,
        descriptor: &mut VariableDescriptor,
    ) -> Result<(), FmuError> {
        if descriptor.required_start() {
            descriptor.set_start(self.current_value())?;
        }
        Ok(())
    }
}
