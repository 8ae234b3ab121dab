use crate::{Backend, Category, Error, HintField, IoDirection, Result};

/// A descriptor of an available device, produced without opening it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// The device name, if present.
    pub name: Option<String>,
    /// A human readable description, if present.
    pub description: Option<String>,
    /// The I/O direction the device is restricted to.
    ///
    /// `None` means the hint doesn't specify a direction, which the native
    /// subsystem uses for devices supporting both.
    pub io: Option<IoDirection>,
}

/// A batch of device hints for a [Category].
///
/// The batch is freed when dropped.
pub struct Hints<'a, B>
where
    B: ?Sized + Backend,
{
    backend: &'a B,
    category: Category,
    handle: B::Hints,
}

impl<'a, B> Hints<'a, B>
where
    B: ?Sized + Backend,
{
    /// Enumerate device hints for the given category.
    pub fn new(backend: &'a B, category: Category) -> Result<Self> {
        let handle = backend
            .name_hint(category)
            .map_err(|source| Error::Hints { category, source })?;

        Ok(Self {
            backend,
            category,
            handle,
        })
    }

    /// The category this batch was enumerated for.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The number of hints in the batch.
    pub fn len(&self) -> usize {
        self.backend.hints_len(&self.handle)
    }

    /// Test if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a single field of the hint at `index`.
    pub fn field(&self, index: usize, field: HintField) -> Option<String> {
        self.backend.hint_field(&self.handle, index, field)
    }

    /// Read the hint at `index`.
    pub fn get(&self, index: usize) -> Option<Hint> {
        if index >= self.len() {
            return None;
        }

        let io = self.field(index, HintField::IoDirection).and_then(|value| {
            let io = IoDirection::from_hint(&value);

            if io.is_none() {
                tracing::debug!("unrecognized hint direction `{}`", value);
            }

            io
        });

        Some(Hint {
            name: self.field(index, HintField::Name),
            description: self.field(index, HintField::Description),
            io,
        })
    }

    /// Iterate over the hints in the batch.
    pub fn iter(&self) -> impl Iterator<Item = Hint> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }
}

impl<B> Drop for Hints<'_, B>
where
    B: ?Sized + Backend,
{
    fn drop(&mut self) {
        self.backend.free_hints(&mut self.handle);
        tracing::debug!("released {} device hints", self.category);
    }
}

/// Collect every device hint of the given category.
///
/// The native batch is released before this returns.
pub fn hints<B>(backend: &B, category: Category) -> Result<Vec<Hint>>
where
    B: ?Sized + Backend,
{
    let batch = Hints::new(backend, category)?;
    let hints = batch.iter().collect();
    Ok(hints)
}
