use serde::Deserialize;

///one row of the examination schedule
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubjectEntry {
    pub name: String,
    pub code: String,
    ///`YYYY-MM-DD` from the date picker, or empty
    pub date: String,
    pub time: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectField {
    Name,
    Code,
    Date,
    Time,
}

impl SubjectField {
    #[cfg(test)]
    pub const ALL: [Self; 4] = [Self::Name, Self::Code, Self::Date, Self::Time];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Code => "code",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

impl SubjectEntry {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    pub fn get(&self, field: SubjectField) -> &str {
        match field {
            SubjectField::Name => &self.name,
            SubjectField::Code => &self.code,
            SubjectField::Date => &self.date,
            SubjectField::Time => &self.time,
        }
    }

    pub fn set(&mut self, field: SubjectField, value: String) {
        let slot = match field {
            SubjectField::Name => &mut self.name,
            SubjectField::Code => &mut self.code,
            SubjectField::Date => &mut self.date,
            SubjectField::Time => &mut self.time,
        };
        *slot = value;
    }
}
