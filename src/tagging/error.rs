use thiserror::Error;

/// Problems with a role dictionary, reported when the classifier is built.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("role dictionary declares no roles")]
    NoRoles,

    #[error("role '{0}' is declared more than once")]
    DuplicateRole(String),

    #[error("role '{0}' has neither strong nor weak phrases")]
    EmptyRole(String),

    #[error("phrase '{phrase}' is registered as both strong and weak for role '{role}'")]
    PhraseInBothTiers { role: String, phrase: String },

    #[error("confusable pair ({0}, {1}) names an undeclared role")]
    UnknownConfusableRole(String, String),

    #[error("phrase '{phrase}' cannot be compiled: {source}")]
    InvalidPhrase {
        phrase: String,
        #[source]
        source: regex::Error,
    },
}
