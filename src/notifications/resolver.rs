pub type ChannelId = String;

const PRIVATE_CHANNEL_SUFFIX: &str = "-private";

/// Map a customer identifier to its private Slack channel. Pure and total;
/// empty input is rejected by request validation before this runs.
pub fn customer_channel(customer: &str) -> ChannelId {
    format!("{}{}", customer.to_lowercase(), PRIVATE_CHANNEL_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::customer_channel;

    #[test]
    fn lowercases_and_suffixes() {
        assert_eq!(customer_channel("Acme"), "acme-private");
        assert_eq!(customer_channel("HSBC"), "hsbc-private");
        assert_eq!(customer_channel("already-lower"), "already-lower-private");
    }

    #[test]
    fn deterministic_and_idempotent_output() {
        let first = customer_channel("Anthropic");
        let second = customer_channel("Anthropic");
        assert_eq!(first, second);
        assert_eq!(first, "anthropic-private");
    }
}
