/// Command reference, grouped the way the app's screens are
pub fn render() -> String {
    let sections: [(&str, &[&str]); 6] = [
        (
            "🔐 Account",
            &[
                "login <email> <password>                          Sign in",
                "signup <first> <last> <email> <pass> <confirm> [phone]  Create an account",
                "profile                                           Show who is signed in",
                "logout                                            Sign out and forget the session",
            ],
        ),
        (
            "🏠 Home",
            &["home [--hide]                                     Balance, card and recent transactions"],
        ),
        (
            "💳 Cards",
            &[
                "cards                                             List your cards",
                "cards add <number> <MM> <YYYY> <cvv> <holder name...>  Add a card",
            ],
        ),
        (
            "💸 Transfers",
            &[
                "send <from_account_id> <rib> <amount> [description...]  Transfer to a RIB",
                "offer <email> <amount> [description...]          Offer money; they accept or reject",
            ],
        ),
        (
            "🔔 Transfer requests",
            &[
                "requests                                          List incoming transfer requests",
                "accept <id>                                       Accept a request (asks twice)",
                "reject <id>                                       Reject a request (asks twice)",
            ],
        ),
        (
            "🎯 General",
            &["help                                              Show this help", "quit                                              Leave"],
        ),
    ];

    let mut output = String::from("📖 Bank App Commands\n");
    for (title, lines) in sections {
        output.push('\n');
        output.push_str(title);
        output.push('\n');
        for line in lines {
            output.push_str("  ");
            output.push_str(line);
            output.push('\n');
        }
    }
    output
}
