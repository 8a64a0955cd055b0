use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resident {
    pub id: String,
    pub slots: usize,
    pub disabled: bool,
    pub elderly: bool,
    pub defaulting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: String,
    pub disabled: bool,
    pub elderly: bool,
}

/// The pool a single draw is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Disabled,
    Elderly,
    Regular,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Disabled => "disabled",
            Category::Elderly => "elderly",
            Category::Regular => "regular",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated tables handed from extract to transform.
#[derive(Debug, Clone, Default)]
pub struct RaffleInput {
    pub residents: Vec<Resident>,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub resident_id: String,
    pub slot_ids: Vec<String>,
}

/// Slot ids per resident, in allocation order. Only built by the allocator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    allocations: Vec<Allocation>,
}

impl Assignment {
    pub(crate) fn from_allocations(allocations: Vec<Allocation>) -> Self {
        Self { allocations }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter()
    }

    pub fn get(&self, resident_id: &str) -> Option<&[String]> {
        self.allocations
            .iter()
            .find(|allocation| allocation.resident_id == resident_id)
            .map(|allocation| allocation.slot_ids.as_slice())
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn total_slots(&self) -> usize {
        self.allocations
            .iter()
            .map(|allocation| allocation.slot_ids.len())
            .sum()
    }
}

/// Where the assignment went, and whether it was actually written there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub output_path: String,
    pub written: bool,
}

/// Field delimiter shared by the input and output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Delimiter {
    Comma,
    #[default]
    Tab,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Delimiter::Comma => "csv",
            Delimiter::Tab => "tsv",
        }
    }

    pub fn residents_file(&self) -> String {
        format!("residents.{}", self.extension())
    }

    pub fn slots_file(&self) -> String {
        format!("slots.{}", self.extension())
    }

    pub fn output_file(&self) -> String {
        format!("output.{}", self.extension())
    }
}
