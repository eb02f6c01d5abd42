// Copyright (c) 2022-2023 The MobileCoin Foundation

/// Build the [Message][crate::Message] enum over catalog types.
///
/// Each type name must also be a [MessageType][crate::MessageType] variant.
macro_rules! stellar_messages {
    ($($name:ident),* $(,)?) => {
        /// Protocol message, one variant per catalog type
        #[derive(Clone, PartialEq, Debug)]
        #[non_exhaustive]
        pub enum Message {
            $( $name($name), )*
        }

        impl Message {
            /// Fetch the [MessageType] identifier for a message
            pub fn message_type(&self) -> MessageType {
                match self {
                    $( Message::$name(_) => MessageType::$name, )*
                }
            }
        }

        $(
            impl From<$name> for Message {
                fn from(m: $name) -> Self {
                    Message::$name(m)
                }
            }

            impl TryFrom<Message> for $name {
                type Error = Message;

                fn try_from(m: Message) -> Result<Self, Self::Error> {
                    match m {
                        Message::$name(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

pub(crate) use stellar_messages;
